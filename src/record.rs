use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RecordError;
use crate::reader::ByteReader;

/// Capabilities a record needs to be stored in a configuration file.
///
/// Binary records are self-delimiting: the container writes them back to back
/// with no length prefix and relies on `read_from` consuming exactly one record.
/// A decoder that stops short of its own boundary without failing cannot be
/// detected by the container; the next record simply starts early.
pub trait RemapRecord: Serialize + DeserializeOwned + Sized {
    /// Appends the binary form of this record to `out`.
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), RecordError>;

    /// Reads one record from the front of `reader`.
    fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, RecordError>;

    fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        let mut out = Vec::new();
        self.write_bytes(&mut out)?;
        Ok(out)
    }
}
