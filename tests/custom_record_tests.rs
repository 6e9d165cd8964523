//! The codec only relies on the `RemapRecord` capabilities, so any record
//! type can be stored.

use keycap_config::{
    load_binary, load_json, save_binary, save_json, ByteReader, ConfigError, FileGroup,
    RecordError, RemapRecord,
};
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Macro {
    name: String,
    keys: Vec<u8>,
}

impl RemapRecord for Macro {
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), RecordError> {
        out.push(self.name.len() as u8);
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(&(self.keys.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.keys);
        Ok(())
    }

    fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, RecordError> {
        let name_len = reader.read_u8()? as usize;
        let name = String::from_utf8_lossy(reader.read_bytes(name_len)?).into_owned();
        let key_count = reader.read_u32()? as usize;
        let keys = reader.read_bytes(key_count)?.to_vec();
        Ok(Self { name, keys })
    }
}

fn macros() -> Vec<Macro> {
    vec![
        Macro {
            name: "greet".to_string(),
            keys: b"HELLO".to_vec(),
        },
        Macro {
            name: String::new(),
            keys: Vec::new(),
        },
    ]
}

#[test]
fn custom_records_roundtrip_in_both_encodings() {
    let dir = tempdir().expect("tempdir");
    let group = FileGroup::new(dir.path().join("macros.kfg"));

    save_binary(&macros(), &group).expect("save binary");
    save_json(&macros(), &group).expect("save json");

    assert_eq!(load_binary::<Macro>(&group).expect("load binary"), macros());
    assert_eq!(load_json::<Macro>(&group).expect("load json"), macros());
}

#[test]
fn overlong_length_field_is_reported_not_truncated() {
    let dir = tempdir().expect("tempdir");
    let group = FileGroup::new(dir.path().join("macros.kfg"));
    let path = save_binary(&macros(), &group).expect("save binary");

    let mut bytes = std::fs::read(&path).expect("read");
    // First record: header (8) + name length (1) + "greet" (5), then the key count.
    bytes[14..18].copy_from_slice(&1000u32.to_le_bytes());
    std::fs::write(&path, bytes).expect("rewrite");

    let err = load_binary::<Macro>(&group).expect_err("length runs past end of file");
    assert!(matches!(
        err,
        ConfigError::EntryDecode {
            index: 0,
            offset: Some(8),
            source: RecordError::UnexpectedEof { needed: 1000, .. },
            ..
        }
    ));
}
