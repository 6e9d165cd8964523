//! Naming for the two on-disk forms of one logical configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::version::{JSON_EXTENSION, KFG_EXTENSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Binary,
    Json,
}

impl Encoding {
    pub const ALL: [Encoding; 2] = [Encoding::Binary, Encoding::Json];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Binary => KFG_EXTENSION,
            Encoding::Json => JSON_EXTENSION,
        }
    }

    /// The other encoding.
    pub fn counterpart(self) -> Self {
        match self {
            Encoding::Binary => Encoding::Json,
            Encoding::Json => Encoding::Binary,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case(KFG_EXTENSION) {
            Some(Encoding::Binary)
        } else if extension.eq_ignore_ascii_case(JSON_EXTENSION) {
            Some(Encoding::Json)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(Self::from_extension)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Binary => f.write_str("binary"),
            Encoding::Json => f.write_str("json"),
        }
    }
}

/// One logical configuration file that may exist as `.kfg`, `.json`, or both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileGroup {
    file_name: PathBuf,
    extension: Option<String>,
}

impl FileGroup {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        let file_name = file_name.into();
        let extension = extension_of(&file_name).map(str::to_string);
        Self {
            file_name,
            extension,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Extension currently associated with the group, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        let extension = extension.into();
        self.extension = Some(extension.trim_start_matches('.').to_string());
    }

    /// Encoding implied by the current extension, if it is a known one.
    pub fn encoding(&self) -> Option<Encoding> {
        self.extension.as_deref().and_then(Encoding::from_extension)
    }

    /// The group's file name with its extension replaced by `extension`.
    ///
    /// A bare dot name such as `.json` counts as all extension, so it
    /// becomes `.kfg` rather than `.json.kfg`.
    pub fn filename_with_extension(&self, extension: &str) -> PathBuf {
        let extension = extension.trim_start_matches('.');
        if is_bare_dot_name(&self.file_name) {
            return self.file_name.with_file_name(format!(".{extension}"));
        }
        self.file_name.with_extension(extension)
    }

    pub fn filename_for(&self, encoding: Encoding) -> PathBuf {
        self.filename_with_extension(encoding.extension())
    }

    /// Open/save dialog filter listing both encodings.
    pub fn file_filter(product_name: &str) -> String {
        format!(
            "{product_name} Json files (*.{JSON_EXTENSION})|*.{JSON_EXTENSION}|\
             {product_name} Config files (*.{KFG_EXTENSION})|*.{KFG_EXTENSION}|\
             All files (*.*)|*.*"
        )
    }
}

fn is_bare_dot_name(path: &Path) -> bool {
    path.extension().is_none()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.len() > 1 && name.starts_with('.'))
}

fn extension_of(path: &Path) -> Option<&str> {
    if is_bare_dot_name(path) {
        return path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| &name[1..]);
    }
    path.extension().and_then(|ext| ext.to_str())
}

impl fmt::Display for FileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name.display())
    }
}

impl From<&Path> for FileGroup {
    fn from(value: &Path) -> Self {
        Self::new(value)
    }
}

impl From<PathBuf> for FileGroup {
    fn from(value: PathBuf) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "tests/file_group_tests.rs"]
mod tests;
