//! Versioned persistence for key remap configurations.
//!
//! A configuration is an ordered list of remap records stored either as a
//! compact binary `.kfg` file or as an indented `.json` file. Both forms carry
//! the same magic prefix and data format version and decode to the same
//! entries.

mod codec;
mod container;
mod entry;
mod error;
mod file_group;
mod reader;
mod record;
mod settings;
mod version;

pub use codec::{
    load, load_binary, load_from_path, load_json, save, save_binary, save_json,
    save_with_settings,
};
pub use container::{
    check_header, decode_binary, decode_json, encode_binary, encode_json, ConfigContainer,
};
pub use entry::{
    input_flags, output_flags, KeyDefinition, RemapEntry, KEY_DEFINITION_LEN, MAX_OUTPUTS,
};
pub use error::{ConfigError, ConfigResult, RecordError};
pub use file_group::{Encoding, FileGroup};
pub use reader::ByteReader;
pub use record::RemapRecord;
pub use settings::PersistSettings;
pub use version::{
    BINARY_HEADER_LEN, DATA_FORMAT_VERSION, FILE_DATA_PREFIX, JSON_EXTENSION, KFG_EXTENSION,
};
