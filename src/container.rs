//! In-memory container and the two encodings of it.
//!
//! Binary layout (all integers little-endian):
//!
//! | offset | size | field                 |
//! |--------|------|-----------------------|
//! | 0      | 4    | [`FILE_DATA_PREFIX`]  |
//! | 4      | 4    | [`DATA_FORMAT_VERSION`] |
//! | 8      | ..   | entry records, back to back, until end of data |
//!
//! The JSON layout is the serde form of [`ConfigContainer`]: a single object
//! with `FileDataPrefix`, `DataFormatVersion` and `RemapEntries` fields, in
//! that order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{ConfigError, ConfigResult, RecordError};
use crate::reader::ByteReader;
use crate::record::RemapRecord;
use crate::version::{BINARY_HEADER_LEN, DATA_FORMAT_VERSION, FILE_DATA_PREFIX};

const PREFIX_FIELD: &str = "FileDataPrefix";
const VERSION_FIELD: &str = "DataFormatVersion";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Header constants plus the ordered entry list, independent of encoding.
///
/// `T` is the entry collection: `Vec<E>` for decoded configurations and
/// `&[E]` when saving entries the caller still owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigContainer<T> {
    #[serde(rename = "FileDataPrefix")]
    pub file_data_prefix: u32,
    #[serde(rename = "DataFormatVersion")]
    pub data_format_version: u32,
    #[serde(rename = "RemapEntries")]
    pub entries: T,
}

impl<T> ConfigContainer<T> {
    pub fn new(entries: T) -> Self {
        Self {
            file_data_prefix: FILE_DATA_PREFIX,
            data_format_version: DATA_FORMAT_VERSION,
            entries,
        }
    }

    pub fn into_entries(self) -> T {
        self.entries
    }
}

impl<'a, E: RemapRecord> ConfigContainer<&'a [E]> {
    /// `source` only names the destination in error messages.
    pub fn to_binary(&self, source: &Path) -> ConfigResult<Vec<u8>> {
        let mut output = Vec::with_capacity(BINARY_HEADER_LEN + self.entries.len() * 16);
        output.extend_from_slice(&self.file_data_prefix.to_le_bytes());
        output.extend_from_slice(&self.data_format_version.to_le_bytes());
        for (index, entry) in self.entries.iter().enumerate() {
            entry
                .write_bytes(&mut output)
                .map_err(|err| ConfigError::EntryEncode {
                    path: source.to_path_buf(),
                    index,
                    source: err,
                })?;
        }
        Ok(output)
    }

    pub fn to_json(&self, source: &Path) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::DocumentEncode {
            path: source.to_path_buf(),
            source: err,
        })
    }
}

impl<E: RemapRecord> ConfigContainer<Vec<E>> {
    /// Borrowing view used by the encoders.
    pub fn as_borrowed(&self) -> ConfigContainer<&[E]> {
        ConfigContainer {
            file_data_prefix: self.file_data_prefix,
            data_format_version: self.data_format_version,
            entries: &self.entries,
        }
    }

    pub fn to_binary(&self, source: &Path) -> ConfigResult<Vec<u8>> {
        self.as_borrowed().to_binary(source)
    }

    pub fn to_json(&self, source: &Path) -> ConfigResult<String> {
        self.as_borrowed().to_json(source)
    }

    /// Decodes a binary configuration, reading records until the data runs out.
    pub fn from_binary(input: &[u8], source: &Path) -> ConfigResult<Self> {
        let mut reader = ByteReader::new(input);
        let prefix = reader.read_u32().ok();
        let version = reader.read_u32().ok();
        check_header(source, prefix, version)?;

        let mut entries = Vec::new();
        while !reader.is_empty() {
            let offset = reader.position();
            let entry_error = |err| ConfigError::EntryDecode {
                path: source.to_path_buf(),
                index: entries.len(),
                offset: Some(offset),
                source: err,
            };
            let entry = E::read_from(&mut reader).map_err(entry_error)?;
            if reader.position() == offset {
                return Err(entry_error(RecordError::NoProgress));
            }
            entries.push(entry);
        }
        Ok(Self::new(entries))
    }

    /// Decodes a JSON configuration. A leading byte order mark is ignored.
    pub fn from_json(input: &str, source: &Path) -> ConfigResult<Self> {
        let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
        if input.trim().is_empty() {
            return Err(ConfigError::ImportFailed {
                path: source.to_path_buf(),
            });
        }
        let document: Value = serde_json::from_str(input)
            .map_err(|err| json_deserialize_error(source, input, &err))?;
        let object = match document {
            Value::Null => {
                return Err(ConfigError::ImportFailed {
                    path: source.to_path_buf(),
                })
            }
            Value::Object(object) => object,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: source.to_path_buf(),
                    found: None,
                })
            }
        };

        let prefix = header_field(object.get(PREFIX_FIELD));
        let version = header_field(object.get(VERSION_FIELD));
        check_header(source, prefix, version)?;

        let document: ConfigContainer<Vec<Value>> = serde_json::from_value(Value::Object(object))
            .map_err(|err| malformed(source, input, err.to_string()))?;
        let entries = document
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|err| ConfigError::EntryDecode {
                    path: source.to_path_buf(),
                    index,
                    offset: None,
                    source: err.into(),
                })
            })
            .collect::<ConfigResult<Vec<E>>>()?;
        Ok(Self::new(entries))
    }
}

/// Rejects anything that is not this file family at the supported version.
///
/// Missing values count as mismatches. The prefix is checked first so a
/// foreign file is always reported as a format problem.
pub fn check_header(source: &Path, prefix: Option<u32>, version: Option<u32>) -> ConfigResult<()> {
    if prefix != Some(FILE_DATA_PREFIX) {
        warn!(path = %source.display(), ?prefix, "rejected file with foreign data prefix");
        return Err(ConfigError::UnsupportedFormat {
            path: source.to_path_buf(),
            found: prefix,
        });
    }
    if version != Some(DATA_FORMAT_VERSION) {
        warn!(path = %source.display(), ?version, "rejected file with unsupported data format version");
        return Err(ConfigError::UnsupportedVersion {
            path: source.to_path_buf(),
            found: version,
        });
    }
    Ok(())
}

pub fn encode_binary<E: RemapRecord>(entries: &[E], source: &Path) -> ConfigResult<Vec<u8>> {
    ConfigContainer::new(entries).to_binary(source)
}

pub fn decode_binary<E: RemapRecord>(input: &[u8], source: &Path) -> ConfigResult<Vec<E>> {
    ConfigContainer::<Vec<E>>::from_binary(input, source).map(ConfigContainer::into_entries)
}

pub fn encode_json<E: RemapRecord>(entries: &[E], source: &Path) -> ConfigResult<String> {
    ConfigContainer::new(entries).to_json(source)
}

pub fn decode_json<E: RemapRecord>(input: &str, source: &Path) -> ConfigResult<Vec<E>> {
    ConfigContainer::<Vec<E>>::from_json(input, source).map(ConfigContainer::into_entries)
}

fn header_field(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
}

#[cold]
#[inline(never)]
fn json_deserialize_error(source: &Path, input: &str, err: &serde_json::Error) -> ConfigError {
    let (offset, length) = json_error_span(input, err);
    ConfigError::MalformedDocument {
        path: source.to_path_buf(),
        message: err.to_string(),
        src: input.to_string(),
        span: (offset, length).into(),
    }
}

fn malformed(source: &Path, input: &str, message: String) -> ConfigError {
    ConfigError::MalformedDocument {
        path: source.to_path_buf(),
        message,
        src: input.to_string(),
        span: (0, 0).into(),
    }
}

/// serde_json reports a one-based line and a byte column within that line.
fn json_error_span(input: &str, error: &serde_json::Error) -> (usize, usize) {
    if input.is_empty() {
        return (0, 0);
    }
    let (line, column) = (error.line(), error.column());
    let mut offset = 0usize;
    if line > 0 && column > 0 {
        offset = input.len() - 1;
        let mut line_start = 0usize;
        for (current_line, chunk) in (1..).zip(input.split_inclusive('\n')) {
            if current_line == line {
                offset = line_start + (column - 1).min(chunk.len() - 1);
                break;
            }
            line_start += chunk.len();
        }
    }
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    let length = input[offset..].chars().next().map_or(0, char::len_utf8);
    (offset, length)
}

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod tests;
