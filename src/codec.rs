//! Saving and loading remap entries through a [`FileGroup`].
//!
//! Each call opens, processes and closes its file in one go. Writes are not
//! crash-atomic: an interrupted save can leave a truncated file, which a later
//! load rejects through the header check or entry decoding.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::container::ConfigContainer;
use crate::error::{ConfigError, ConfigResult};
use crate::file_group::{Encoding, FileGroup};
use crate::record::RemapRecord;
use crate::settings::PersistSettings;

/// Saves the entries as `<group>.kfg` and returns the path written.
#[instrument(level = "debug", skip_all, fields(group = %group, count = entries.len()))]
pub fn save_binary<E: RemapRecord>(entries: &[E], group: &FileGroup) -> ConfigResult<PathBuf> {
    let path = group.filename_for(Encoding::Binary);
    // Encode before opening so a record that cannot be written leaves the old file intact.
    let bytes = ConfigContainer::new(entries).to_binary(&path)?;
    write_file(&path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved binary configuration");
    Ok(path)
}

/// Loads entries from `<group>.kfg`.
#[instrument(level = "debug", skip_all, fields(group = %group))]
pub fn load_binary<E: RemapRecord>(group: &FileGroup) -> ConfigResult<Vec<E>> {
    let path = group.filename_for(Encoding::Binary);
    let bytes = read_file(&path)?;
    let entries = ConfigContainer::<Vec<E>>::from_binary(&bytes, &path)?.into_entries();
    debug!(path = %path.display(), count = entries.len(), "loaded binary configuration");
    Ok(entries)
}

/// Saves the entries as indented `<group>.json` and returns the path written.
#[instrument(level = "debug", skip_all, fields(group = %group, count = entries.len()))]
pub fn save_json<E: RemapRecord>(entries: &[E], group: &FileGroup) -> ConfigResult<PathBuf> {
    let path = group.filename_for(Encoding::Json);
    let text = ConfigContainer::new(entries).to_json(&path)?;
    write_file(&path, text.as_bytes())?;
    debug!(path = %path.display(), bytes = text.len(), "saved json configuration");
    Ok(path)
}

/// Loads entries from `<group>.json`.
#[instrument(level = "debug", skip_all, fields(group = %group))]
pub fn load_json<E: RemapRecord>(group: &FileGroup) -> ConfigResult<Vec<E>> {
    let path = group.filename_for(Encoding::Json);
    let bytes = read_file(&path)?;
    let text = String::from_utf8(bytes).map_err(|err| ConfigError::MalformedDocument {
        path: path.clone(),
        message: err.to_string(),
        src: String::new(),
        span: (0, 0).into(),
    })?;
    let entries = ConfigContainer::<Vec<E>>::from_json(&text, &path)?.into_entries();
    debug!(path = %path.display(), count = entries.len(), "loaded json configuration");
    Ok(entries)
}

pub fn save<E: RemapRecord>(
    entries: &[E],
    group: &FileGroup,
    encoding: Encoding,
) -> ConfigResult<PathBuf> {
    match encoding {
        Encoding::Binary => save_binary(entries, group),
        Encoding::Json => save_json(entries, group),
    }
}

pub fn load<E: RemapRecord>(group: &FileGroup, encoding: Encoding) -> ConfigResult<Vec<E>> {
    match encoding {
        Encoding::Binary => load_binary(group),
        Encoding::Json => load_json(group),
    }
}

/// Loads a file whose encoding is given by its extension.
///
/// A failure is returned as is; the other encoding is never tried.
pub fn load_from_path<E: RemapRecord>(path: impl AsRef<Path>) -> ConfigResult<Vec<E>> {
    let path = path.as_ref();
    let encoding = Encoding::from_path(path).ok_or_else(|| ConfigError::UnknownExtension {
        path: path.to_path_buf(),
    })?;
    load(&FileGroup::new(path), encoding)
}

/// Writes every encoding selected by `settings`, primary first, stopping at the first failure.
pub fn save_with_settings<E: RemapRecord>(
    entries: &[E],
    group: &FileGroup,
    settings: &PersistSettings,
) -> ConfigResult<Vec<PathBuf>> {
    settings
        .encodings()
        .into_iter()
        .map(|encoding| save(entries, group, encoding))
        .collect()
}

fn write_file(path: &Path, bytes: &[u8]) -> ConfigResult<()> {
    let mut file = open_exclusive_write(path).map_err(|err| ConfigError::io(path, err))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|err| ConfigError::io(path, err))
}

fn read_file(path: &Path) -> ConfigResult<Vec<u8>> {
    let mut file = open_shared_read(path).map_err(|err| ConfigError::io(path, err))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|err| ConfigError::io(path, err))?;
    Ok(bytes)
}

fn open_exclusive_write(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(0);
    }
    options.open(path)
}

fn open_shared_read(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        const FILE_SHARE_READ: u32 = 0x0000_0001;
        options.share_mode(FILE_SHARE_READ);
    }
    options.open(path)
}
