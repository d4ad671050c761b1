//! Immutable stack value with hex, byte and script-number views

use std::fmt;

use crate::error::Result;

/// A VM stack value.
///
/// The numeric view uses the script-number encoding: little-endian magnitude with
/// the sign in the high bit of the last byte, zero encoded as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteValue {
    bytes: Vec<u8>,
}

impl ByteValue {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ByteValue { bytes: bytes.into() }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Ok(ByteValue { bytes: hex::decode(hex_str)? })
    }

    pub fn from_number(number: i64) -> Self {
        let mut magnitude = number.unsigned_abs();
        let mut bytes = Vec::new();
        while magnitude > 0 {
            bytes.push((magnitude & 0xff) as u8);
            magnitude >>= 8;
        }
        if let Some(last) = bytes.last_mut() {
            if *last & 0x80 != 0 {
                bytes.push(if number < 0 { 0x80 } else { 0x00 });
            } else if number < 0 {
                *last |= 0x80;
            }
        }
        ByteValue { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Script-number value, `None` if wider than 8 bytes.
    pub fn number(&self) -> Option<i64> {
        if self.bytes.len() > 8 {
            return None;
        }
        let Some((&last, rest)) = self.bytes.split_last() else {
            return Some(0);
        };
        let mut magnitude: u64 = (last & 0x7f) as u64;
        for &byte in rest.iter().rev() {
            magnitude = (magnitude << 8) | byte as u64;
        }
        let magnitude = i64::try_from(magnitude).ok()?;
        Some(if last & 0x80 != 0 { -magnitude } else { magnitude })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteValue {
    fn from(bytes: Vec<u8>) -> Self {
        ByteValue::from_bytes(bytes)
    }
}

impl From<&[u8]> for ByteValue {
    fn from(bytes: &[u8]) -> Self {
        ByteValue::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for ByteValue {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ByteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
