//! Format constants for remap configuration files.
//!
//! Both encodings carry the same prefix and version. Neither value is ever
//! negotiated or migrated: a file either matches them exactly or is rejected.

/// Magic prefix identifying the remap configuration file family.
pub const FILE_DATA_PREFIX: u32 = 0x0E0C_A000;

/// Current data format version.
/// Increment when the entry record layout changes.
pub const DATA_FORMAT_VERSION: u32 = 1;

/// Size in bytes of the binary header (prefix + version).
pub const BINARY_HEADER_LEN: usize = 8;

/// Extension used for the binary encoding.
pub const KFG_EXTENSION: &str = "kfg";

/// Extension used for the JSON encoding.
pub const JSON_EXTENSION: &str = "json";
