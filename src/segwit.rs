//! Segregated Witness signature message (BIP143)
//!
//! ```text
//! version ‖ hashPrevouts ‖ hashSequence ‖ outpoint ‖ scriptCode ‖ amount
//!         ‖ nSequence ‖ hashOutputs ‖ nLocktime ‖ sighash type
//! ```
//!
//! hashSequence commits only to the signing input's own sequence.

use crate::constants::SEGWIT_SIGHASH_TRAILER;
use crate::encoding::*;
use crate::error::Result;
use crate::hashes::hash256;
use crate::types::*;

/// Σ reverse(previousTxId) ‖ vout(4LE) over all inputs
pub(crate) fn serialize_prevouts(inputs: &[TxInput]) -> Result<Vec<u8>> {
    let mut prevouts = Vec::with_capacity(inputs.len() * 36);
    for input in inputs {
        let txid: Hash = parse_reversed_field(&input.previous_tx_id, "previousTxId")?;
        let vout = parse_u32_field(&input.vout, "vout")?;
        prevouts.extend_from_slice(&txid);
        prevouts.extend_from_slice(&num_to_le32(vout));
    }
    Ok(prevouts)
}

/// Σ amount(8LE) ‖ compact_size ‖ scriptPubKey over `outputs`
pub(crate) fn serialize_outputs(outputs: &[TxOutput]) -> Result<Vec<u8>> {
    let mut serialized = Vec::new();
    for output in outputs {
        let amount = parse_amount(&output.amount, "output amount")?;
        let script = parse_hex_field(&output.script_pub_key, "output scriptPubKey")?;
        serialized.extend_from_slice(&num_to_le64(amount));
        serialized.extend_from_slice(&serialize_script(&script));
    }
    Ok(serialized)
}

/// Build the BIP143 preimage for the input at `current_input_index`.
pub fn segwit_serialization(tx: &TxData) -> Result<Vec<u8>> {
    let input = tx.current_input()?;

    let script_code = parse_hex_field(&input.script_pub_key, "scriptPubKey")?;
    let vout = parse_u32_field(&input.vout, "vout")?;
    let amount = parse_amount(&input.amount, "amount")?;
    let timelock = parse_u32_field(&tx.timelock, "timelock")?;
    let version = parse_u32_field(&tx.version, "version")?;
    let txid: Hash = parse_reversed_field(&input.previous_tx_id, "previousTxId")?;
    let sequence: [u8; 4] = parse_reversed_field(&input.sequence, "sequence")?;

    let hash_prevouts = hash256(&serialize_prevouts(&tx.inputs)?);
    let hash_sequence = hash256(&sequence);
    let hash_outputs = hash256(&serialize_outputs(&tx.outputs)?);

    let mut preimage = Vec::with_capacity(156 + script_code.len() + 9);
    preimage.extend_from_slice(&num_to_le32(version));
    preimage.extend_from_slice(&hash_prevouts);
    preimage.extend_from_slice(&hash_sequence);
    preimage.extend_from_slice(&txid);
    preimage.extend_from_slice(&num_to_le32(vout));
    preimage.extend_from_slice(&serialize_script(&script_code));
    preimage.extend_from_slice(&num_to_le64(amount));
    preimage.extend_from_slice(&sequence);
    preimage.extend_from_slice(&hash_outputs);
    preimage.extend_from_slice(&num_to_le32(timelock));
    preimage.extend_from_slice(&SEGWIT_SIGHASH_TRAILER);

    log::trace!(
        "segwit preimage for input {}: {}",
        tx.current_input_index,
        hex::encode(&preimage)
    );
    Ok(preimage)
}

/// BIP143 signature hash: HASH256(preimage)
pub fn segwit_sighash(tx: &TxData) -> Result<Hash> {
    Ok(hash256(&segwit_serialization(tx)?))
}
