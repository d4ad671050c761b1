//! Wire encoding helpers and template field decoding

use crate::constants::{AMOUNT_DECIMALS, SATOSHIS_PER_COIN};
use crate::error::{Result, SighashError};

pub fn num_to_le32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn num_to_le64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Reverse the byte order of a hex string (display order <-> wire order)
pub fn reverse_hex(hex_str: &str) -> Result<String> {
    let mut bytes = hex::decode(hex_str)?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}

/// Encode a number as a Bitcoin compact size (varint)
pub fn compact_size(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value <= 0xffff {
        let mut result = vec![0xfd];
        result.extend_from_slice(&(value as u16).to_le_bytes());
        result
    } else if value <= 0xffffffff {
        let mut result = vec![0xfe];
        result.extend_from_slice(&(value as u32).to_le_bytes());
        result
    } else {
        let mut result = vec![0xff];
        result.extend_from_slice(&value.to_le_bytes());
        result
    }
}

/// Length-prefixed script as it appears inside a serialized output
pub fn serialize_script(script: &[u8]) -> Vec<u8> {
    let mut out = compact_size(script.len() as u64);
    out.extend_from_slice(script);
    out
}

/// Fail fast on an empty template field
pub fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(SighashError::IncompleteTransactionTemplate(field));
    }
    Ok(value)
}

fn invalid(field: &'static str, value: &str) -> SighashError {
    SighashError::InvalidTemplateField { field, value: value.to_string() }
}

/// Decimal template field (version, timelock, vout). Digits only, no sign.
pub fn parse_u32_field(value: &str, field: &'static str) -> Result<u32> {
    if !require(value, field)?.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, value));
    }
    value.parse::<u32>().map_err(|_| invalid(field, value))
}

/// Hex template field (scripts)
pub fn parse_hex_field(value: &str, field: &'static str) -> Result<Vec<u8>> {
    hex::decode(require(value, field)?).map_err(|_| invalid(field, value))
}

/// Fixed-width hex field given in big-endian display order, returned in wire order
pub fn parse_reversed_field<const N: usize>(value: &str, field: &'static str) -> Result<[u8; N]> {
    let bytes = parse_hex_field(value, field)?;
    let mut out: [u8; N] = bytes.try_into().map_err(|_| invalid(field, value))?;
    out.reverse();
    Ok(out)
}

/// Whole-coin decimal amount scaled to satoshis.
///
/// Exact decimal arithmetic: at most eight fractional digits, no sign, no exponent.
pub fn parse_amount(value: &str, field: &'static str) -> Result<u64> {
    require(value, field)?;
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !all_digits(whole)
        || !all_digits(fraction)
        || fraction.len() > AMOUNT_DECIMALS
    {
        return Err(invalid(field, value));
    }

    let whole_sats = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .ok()
            .and_then(|coins| coins.checked_mul(SATOSHIS_PER_COIN))
            .ok_or_else(|| invalid(field, value))?
    };
    let fraction_sats = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = AMOUNT_DECIMALS);
        padded.parse::<u64>().map_err(|_| invalid(field, value))?
    };
    whole_sats
        .checked_add(fraction_sats)
        .ok_or_else(|| invalid(field, value))
}
