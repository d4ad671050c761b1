//! DER signature codec
//!
//! Signatures are walked as tag → length → value, twice inside an outer sequence:
//!
//! ```text
//! 0x30 <total> 0x02 <rlen> <r> 0x02 <slen> <s>
//! ```
//!
//! Every step is bounds checked and returns a typed error instead of panicking.

use crate::constants::{DER_INTEGER_TAG, DER_SEQUENCE_TAG};
use crate::error::{Result, SighashError};

/// (r, s) decoded from DER as big-endian unsigned magnitudes without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerSignature {
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}

impl DerSignature {
    /// 64-byte r ‖ s, `None` if either integer does not fit in 32 bytes.
    pub fn to_compact(&self) -> Option<[u8; 64]> {
        let mut compact = [0u8; 64];
        let (r_slot, s_slot) = compact.split_at_mut(32);
        for (value, slot) in [(&self.r, r_slot), (&self.s, s_slot)] {
            if value.len() > 32 {
                return None;
            }
            slot[32 - value.len()..].copy_from_slice(value);
        }
        Some(compact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    R,
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SequenceTag,
    SequenceLength,
    IntegerTag(Component),
    IntegerLength(Component),
    IntegerValue(Component, usize),
    Done,
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

fn strip_leading_zeros(value: &[u8]) -> Vec<u8> {
    let first = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    value[first..].to_vec()
}

/// Decode a DER signature into its (r, s) integers.
///
/// A missing 0x30 tag is `InvalidSignatureEncoding`; a total length that does not
/// match the bytes that follow it is `InvalidSignatureLength`; malformed integer
/// fields or trailing data inside the sequence are `InvalidSignatureEncoding`.
pub fn decode_der(signature: &[u8]) -> Result<DerSignature> {
    let mut cursor = Cursor { data: signature, pos: 0 };
    let mut state = State::SequenceTag;
    let mut r = Vec::new();
    let mut s = Vec::new();

    loop {
        state = match state {
            State::SequenceTag => match cursor.byte() {
                Some(DER_SEQUENCE_TAG) => State::SequenceLength,
                _ => return Err(SighashError::InvalidSignatureEncoding),
            },
            State::SequenceLength => {
                let declared = cursor.byte().ok_or(SighashError::InvalidSignatureLength)?;
                if declared as usize != cursor.remaining() {
                    return Err(SighashError::InvalidSignatureLength);
                }
                State::IntegerTag(Component::R)
            }
            State::IntegerTag(component) => match cursor.byte() {
                Some(DER_INTEGER_TAG) => State::IntegerLength(component),
                _ => return Err(SighashError::InvalidSignatureEncoding),
            },
            State::IntegerLength(component) => {
                let len = cursor.byte().ok_or(SighashError::InvalidSignatureEncoding)?;
                State::IntegerValue(component, len as usize)
            }
            State::IntegerValue(component, len) => {
                let value = cursor.take(len).ok_or(SighashError::InvalidSignatureEncoding)?;
                match component {
                    Component::R => {
                        r = strip_leading_zeros(value);
                        State::IntegerTag(Component::S)
                    }
                    Component::S => {
                        s = strip_leading_zeros(value);
                        State::Done
                    }
                }
            }
            State::Done => {
                if cursor.remaining() != 0 {
                    return Err(SighashError::InvalidSignatureEncoding);
                }
                return Ok(DerSignature { r, s });
            }
        };
    }
}

fn encode_integer(value: &[u8], out: &mut Vec<u8>) {
    let mut body = strip_leading_zeros(value);
    if body.first().map_or(true, |&b| b & 0x80 != 0) {
        body.insert(0, 0x00);
    }
    out.push(DER_INTEGER_TAG);
    out.push(body.len() as u8);
    out.extend_from_slice(&body);
}

/// DER-encode a 64-byte r ‖ s pair (minimal integers, sign padding where needed).
pub fn encode_der(compact: &[u8; 64]) -> Vec<u8> {
    let mut body = Vec::with_capacity(70);
    encode_integer(&compact[..32], &mut body);
    encode_integer(&compact[32..], &mut body);

    let mut der = Vec::with_capacity(body.len() + 2);
    der.push(DER_SEQUENCE_TAG);
    der.push(body.len() as u8);
    der.extend_from_slice(&body);
    der
}
