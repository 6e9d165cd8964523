//! Concrete remap record: one input key definition mapped to a sequence of
//! output key definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::reader::ByteReader;
use crate::record::RemapRecord;

/// Flags valid on the input side of an entry.
pub mod input_flags {
    pub const SHIFT: u32 = 1 << 0;
    pub const CONTROL: u32 = 1 << 1;
    pub const ALT: u32 = 1 << 2;
    pub const LONG_PRESS: u32 = 1 << 3;
}

/// Flags valid on the output side of an entry.
pub mod output_flags {
    pub const DOWN: u32 = 1 << 0;
    pub const UP: u32 = 1 << 1;
    pub const TOGGLE: u32 = 1 << 2;
    pub const SHIFT: u32 = 1 << 3;
    pub const CONTROL: u32 = 1 << 4;
    pub const ALT: u32 = 1 << 5;
    pub const NOTHING: u32 = 1 << 6;
    pub const MOUSE_OUT: u32 = 1 << 7;
    pub const DELAY: u32 = 1 << 8;
    pub const REPEAT: u32 = 1 << 9;
    pub const CANCEL_ACTIVE_OUTPUTS: u32 = 1 << 10;
}

/// Encoded size of a [`KeyDefinition`]: flags (4) + virtual key (1) + parameter (4).
pub const KEY_DEFINITION_LEN: usize = 9;

/// Largest output list a single entry can encode (count is stored in one byte).
pub const MAX_OUTPUTS: usize = u8::MAX as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyDefinition {
    pub virtual_key: u8,
    pub flags: u32,
    /// Flag-dependent argument, e.g. the delay in milliseconds for `DELAY`.
    pub parameter: u32,
}

impl KeyDefinition {
    pub fn new(virtual_key: u8, flags: u32) -> Self {
        Self {
            virtual_key,
            flags,
            parameter: 0,
        }
    }

    pub fn with_parameter(mut self, parameter: u32) -> Self {
        self.parameter = parameter;
        self
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.push(self.virtual_key);
        out.extend_from_slice(&self.parameter.to_le_bytes());
    }

    fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, RecordError> {
        let flags = reader.read_u32()?;
        let virtual_key = reader.read_u8()?;
        let parameter = reader.read_u32()?;
        Ok(Self {
            virtual_key,
            flags,
            parameter,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemapEntry {
    pub input: KeyDefinition,
    #[serde(default)]
    pub outputs: Vec<KeyDefinition>,
}

impl RemapEntry {
    pub fn new(input: KeyDefinition, outputs: Vec<KeyDefinition>) -> Self {
        Self { input, outputs }
    }

    pub fn push_output(&mut self, output: KeyDefinition) {
        self.outputs.push(output);
    }

    /// Number of bytes this entry occupies in the binary encoding.
    pub fn encoded_len(&self) -> usize {
        KEY_DEFINITION_LEN + 1 + self.outputs.len() * KEY_DEFINITION_LEN
    }
}

impl RemapRecord for RemapEntry {
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), RecordError> {
        let count = u8::try_from(self.outputs.len()).map_err(|_| RecordError::TooManyOutputs {
            count: self.outputs.len(),
            max: MAX_OUTPUTS,
        })?;
        out.reserve(self.encoded_len());
        self.input.write_bytes(out);
        out.push(count);
        for output in &self.outputs {
            output.write_bytes(out);
        }
        Ok(())
    }

    fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, RecordError> {
        let input = KeyDefinition::read_from(reader)?;
        let count = reader.read_u8()? as usize;
        let mut outputs = Vec::with_capacity(count);
        for _ in 0..count {
            outputs.push(KeyDefinition::read_from(reader)?);
        }
        Ok(Self { input, outputs })
    }
}

impl fmt::Display for RemapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_input(f, &self.input)?;
        f.write_str(" -> ")?;
        if self.outputs.is_empty() {
            return f.write_str("(none)");
        }
        for (index, output) in self.outputs.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write_output(f, output)?;
        }
        Ok(())
    }
}

fn write_input(f: &mut fmt::Formatter<'_>, key: &KeyDefinition) -> fmt::Result {
    use input_flags::*;
    for (flag, name) in [(SHIFT, "Shift+"), (CONTROL, "Ctrl+"), (ALT, "Alt+")] {
        if key.has_flag(flag) {
            f.write_str(name)?;
        }
    }
    write!(f, "0x{:02X}", key.virtual_key)?;
    if key.has_flag(LONG_PRESS) {
        f.write_str(" [long press]")?;
    }
    Ok(())
}

fn write_output(f: &mut fmt::Formatter<'_>, key: &KeyDefinition) -> fmt::Result {
    use output_flags::*;
    if key.has_flag(NOTHING) {
        return f.write_str("nothing");
    }
    if key.has_flag(CANCEL_ACTIVE_OUTPUTS) {
        return f.write_str("cancel active outputs");
    }
    if key.has_flag(DELAY) {
        return write!(f, "delay {}ms", key.parameter);
    }
    for (flag, name) in [(SHIFT, "Shift+"), (CONTROL, "Ctrl+"), (ALT, "Alt+")] {
        if key.has_flag(flag) {
            f.write_str(name)?;
        }
    }
    if key.has_flag(MOUSE_OUT) {
        write!(f, "mouse 0x{:02X}", key.virtual_key)?;
    } else {
        write!(f, "0x{:02X}", key.virtual_key)?;
    }
    let mode = if key.has_flag(TOGGLE) {
        Some("toggle")
    } else if key.has_flag(DOWN) && !key.has_flag(UP) {
        Some("down")
    } else if key.has_flag(UP) && !key.has_flag(DOWN) {
        Some("up")
    } else {
        None
    };
    if let Some(mode) = mode {
        write!(f, " ({mode})")?;
    }
    if key.has_flag(REPEAT) {
        write!(f, " x{}", key.parameter)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;
