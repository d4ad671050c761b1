//! Taproot output-key tweak check and tapscript signature message (BIP341)

use crate::backend::{CurveBackend, Secp256k1Backend};
use crate::constants::*;
use crate::encoding::*;
use crate::error::{Result, SighashError};
use crate::hashes::{sha256, tag_hash, tap_leaf};
use crate::segwit::{serialize_outputs, serialize_prevouts};
use crate::types::*;
use crate::value::ByteValue;

/// TapTweak tagged hash of internal_key ‖ merkle_root.
///
/// An empty `merkle_root` gives the key-path-only tweak.
pub fn taproot_tweak(internal_key: &[u8; 32], merkle_root: &[u8]) -> Hash {
    let mut data = Vec::with_capacity(32 + merkle_root.len());
    data.extend_from_slice(internal_key);
    data.extend_from_slice(merkle_root);
    tag_hash(TAG_TAP_TWEAK, &data)
}

/// OutputKey = lift_x(InternalKey) + tweak × G, compressed (parity ‖ X)
pub fn compute_tweaked_key(internal_key: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 33]> {
    Secp256k1Backend::new().tweak_add(internal_key, tweak)
}

/// Check that `tweaked_key` is `internal_key` tweaked by `tweak`.
///
/// Returns 1 on a match and 0 on a mismatch, including a mismatched parity
/// prefix. Only malformed inputs are errors.
pub fn tweak_verify(tweaked_key: &ByteValue, tweak: &ByteValue, internal_key: &ByteValue) -> Result<ByteValue> {
    tweak_verify_with(&Secp256k1Backend::new(), tweaked_key, tweak, internal_key)
}

pub fn tweak_verify_with<B: CurveBackend + ?Sized>(
    backend: &B,
    tweaked_key: &ByteValue,
    tweak: &ByteValue,
    internal_key: &ByteValue,
) -> Result<ByteValue> {
    let tweak: [u8; 32] = tweak
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidTweakLength)?;
    let internal_key: [u8; 32] = internal_key
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidInternalKeyLength)?;
    if !matches!(tweaked_key.bytes().first().copied(), Some(0x02) | Some(0x03)) {
        return Err(SighashError::InvalidTweakedKeyPrefix);
    }

    let expected = backend.tweak_add(&internal_key, &tweak)?;
    Ok(ByteValue::from_number((expected[..] == *tweaked_key.bytes()) as i64))
}

fn serialize_amounts(inputs: &[TxInput]) -> Result<Vec<u8>> {
    let mut amounts = Vec::with_capacity(inputs.len() * 8);
    for input in inputs {
        amounts.extend_from_slice(&num_to_le64(parse_amount(&input.amount, "amount")?));
    }
    Ok(amounts)
}

fn serialize_script_pubkeys(inputs: &[TxInput]) -> Result<Vec<u8>> {
    let mut scripts = Vec::new();
    for input in inputs {
        scripts.extend_from_slice(&serialize_script(&parse_hex_field(&input.script_pub_key, "scriptPubKey")?));
    }
    Ok(scripts)
}

fn serialize_sequences(inputs: &[TxInput]) -> Result<Vec<u8>> {
    let mut sequences = Vec::with_capacity(inputs.len() * 4);
    for input in inputs {
        let sequence: [u8; 4] = parse_reversed_field(&input.sequence, "sequence")?;
        sequences.extend_from_slice(&sequence);
    }
    Ok(sequences)
}

/// Build the tapscript signature message for the input at `current_input_index`.
///
/// ```text
/// epoch ‖ hash_type ‖ version ‖ locktime ‖ sha_prevouts ‖ sha_amounts
///       ‖ sha_scriptpubkeys ‖ sha_sequences ‖ [sha_outputs] ‖ spend_type
///       ‖ input_index ‖ [sha_single_output] ‖ tapleaf_hash ‖ key_version
///       ‖ codesep_pos
/// ```
///
/// All inputs are always committed to. Under SIGHASH_SINGLE the output at the
/// signing index replaces the all-outputs hash.
pub fn taproot_serialization(
    tx: &TxData,
    leaf_script: &[u8],
    network: Network,
    sighash_type: SighashType,
    code_separator_position: Option<u32>,
) -> Result<Vec<u8>> {
    let version = parse_u32_field(&tx.version, "version")?;
    let timelock = parse_u32_field(&tx.timelock, "timelock")?;
    tx.current_input()?;

    let sha_prevouts = sha256(&serialize_prevouts(&tx.inputs)?);
    let sha_amounts = sha256(&serialize_amounts(&tx.inputs)?);
    let sha_script_pubkeys = sha256(&serialize_script_pubkeys(&tx.inputs)?);
    let sha_sequences = sha256(&serialize_sequences(&tx.inputs)?);

    let (sha_outputs, sha_single_output) = if sighash_type.is_single() {
        let output = tx
            .outputs
            .get(tx.current_input_index)
            .ok_or(SighashError::InputIndexOutOfRange {
                index: tx.current_input_index,
                len: tx.outputs.len(),
            })?;
        (None, Some(sha256(&serialize_outputs(std::slice::from_ref(output))?)))
    } else {
        (Some(sha256(&serialize_outputs(&tx.outputs)?)), None)
    };

    let tapleaf_hash = tap_leaf(leaf_script, network.leaf_version());
    let input_index = u32::try_from(tx.current_input_index).map_err(|_| {
        SighashError::InputIndexOutOfRange { index: tx.current_input_index, len: tx.inputs.len() }
    })?;

    let mut preimage = Vec::with_capacity(212);
    preimage.push(TAPROOT_SIGHASH_EPOCH);
    preimage.push(sighash_type.to_u8());
    preimage.extend_from_slice(&num_to_le32(version));
    preimage.extend_from_slice(&num_to_le32(timelock));
    preimage.extend_from_slice(&sha_prevouts);
    preimage.extend_from_slice(&sha_amounts);
    preimage.extend_from_slice(&sha_script_pubkeys);
    preimage.extend_from_slice(&sha_sequences);
    if let Some(sha_outputs) = sha_outputs {
        preimage.extend_from_slice(&sha_outputs);
    }
    preimage.push(TAPROOT_SPEND_TYPE_SCRIPT);
    preimage.extend_from_slice(&num_to_le32(input_index));
    if let Some(sha_single_output) = sha_single_output {
        preimage.extend_from_slice(&sha_single_output);
    }
    preimage.extend_from_slice(&tapleaf_hash);
    preimage.push(TAPROOT_KEY_VERSION);
    preimage.extend_from_slice(&num_to_le32(code_separator_position.unwrap_or(NO_CODE_SEPARATOR)));

    log::trace!(
        "taproot preimage for input {} ({:?}, hash type {:#04x}): {}",
        tx.current_input_index,
        network,
        sighash_type.to_u8(),
        hex::encode(&preimage)
    );
    Ok(preimage)
}

/// TapSighash tagged hash of the tapscript signature message
pub fn taproot_sighash(
    tx: &TxData,
    leaf_script: &[u8],
    network: Network,
    sighash_type: SighashType,
    code_separator_position: Option<u32>,
) -> Result<Hash> {
    let preimage = taproot_serialization(tx, leaf_script, network, sighash_type, code_separator_position)?;
    Ok(tag_hash(TAG_TAP_SIGHASH, &preimage))
}
