use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::file_group::Encoding;

/// Which encodings a save writes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PersistSettings {
    pub primary: Encoding,
    /// Also write the other encoding next to the primary file.
    pub mirror: bool,
}

impl Default for PersistSettings {
    fn default() -> Self {
        Self {
            primary: Encoding::Binary,
            mirror: true,
        }
    }
}

impl PersistSettings {
    /// Encodings to write, primary first.
    pub fn encodings(&self) -> Vec<Encoding> {
        if self.mirror {
            vec![self.primary, self.primary.counterpart()]
        } else {
            vec![self.primary]
        }
    }

    /// Reads settings from a TOML file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        toml::from_str(&raw).map_err(|err| ConfigError::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| ConfigError::io(parent, err))?;
        }
        let payload = toml::to_string_pretty(self).map_err(|err| ConfigError::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        fs::write(path, payload).map_err(|err| ConfigError::io(path, err))
    }
}
