//! Signature-check dispatch for CHECKSIG and CHECKMULTISIG
//!
//! The context's version selects both the signature message and the scheme:
//! segwit checks ECDSA over the BIP143 preimage, tapscript checks BIP340 over
//! the TapSighash of the BIP341 preimage.

use crate::backend::{CurveBackend, Secp256k1Backend};
use crate::constants::TAG_TAP_SIGHASH;
use crate::ecdsa::ecdsa_verify_with;
use crate::error::Result;
use crate::hashes::{sha256, tag_hash};
use crate::schnorr::schnorr_verify_with;
use crate::segwit::segwit_serialization;
use crate::taproot::taproot_serialization;
use crate::types::*;
use crate::value::ByteValue;

/// Message handed to the scheme verifier for `tx` under `context`.
///
/// Segwit returns SHA256(preimage); the ECDSA verifier hashes once more.
pub fn signature_message(tx: &TxData, context: &SighashContext) -> Result<ByteValue> {
    let message = match context.version {
        NetworkVersion::Segwit => sha256(&segwit_serialization(tx)?),
        NetworkVersion::Tapscript(network) => {
            let preimage = taproot_serialization(
                tx,
                &context.leaf_script,
                network,
                context.sighash_type,
                context.code_separator_position,
            )?;
            tag_hash(TAG_TAP_SIGHASH, &preimage)
        }
    };
    Ok(ByteValue::from_bytes(message.to_vec()))
}

fn verify_message<B: CurveBackend + ?Sized>(
    backend: &B,
    version: NetworkVersion,
    signature: &ByteValue,
    message: &ByteValue,
    public_key: &ByteValue,
) -> Result<ByteValue> {
    if version.is_tapscript() {
        schnorr_verify_with(backend, signature, message, public_key)
    } else {
        ecdsa_verify_with(backend, signature, message, public_key)
    }
}

/// OP_CHECKSIG: 1 if `signature` is valid for `public_key` over the input being signed.
pub fn check_sig(
    signature: &ByteValue,
    public_key: &ByteValue,
    tx: &TxData,
    context: &SighashContext,
) -> Result<ByteValue> {
    check_sig_with(&Secp256k1Backend::new(), signature, public_key, tx, context)
}

pub fn check_sig_with<B: CurveBackend + ?Sized>(
    backend: &B,
    signature: &ByteValue,
    public_key: &ByteValue,
    tx: &TxData,
    context: &SighashContext,
) -> Result<ByteValue> {
    log::debug!(
        "check_sig: {:?} input {} hash type {:#04x}",
        context.version,
        tx.current_input_index,
        context.sighash_type.to_u8()
    );
    let message = signature_message(tx, context)?;
    verify_message(backend, context.version, signature, &message, public_key)
}

/// OP_CHECKMULTISIG.
///
/// Every signature is tried against every public key and the passing checks are
/// counted; the result is 1 when that count equals the number of signatures.
/// Ordering is not enforced, and a signature that verifies under two keys
/// counts twice.
pub fn check_multi_sig(
    public_keys: &[ByteValue],
    signatures: &[ByteValue],
    tx: &TxData,
    context: &SighashContext,
) -> Result<ByteValue> {
    check_multi_sig_with(&Secp256k1Backend::new(), public_keys, signatures, tx, context)
}

pub fn check_multi_sig_with<B: CurveBackend + ?Sized>(
    backend: &B,
    public_keys: &[ByteValue],
    signatures: &[ByteValue],
    tx: &TxData,
    context: &SighashContext,
) -> Result<ByteValue> {
    log::debug!(
        "check_multi_sig: {:?} input {} with {} signatures and {} keys",
        context.version,
        tx.current_input_index,
        signatures.len(),
        public_keys.len()
    );
    let message = signature_message(tx, context)?;

    // scheme follows the context version, same as check_sig
    let mut passed = 0usize;
    for signature in signatures {
        for public_key in public_keys {
            let result = verify_message(backend, context.version, signature, &message, public_key)?;
            if result.number() == Some(1) {
                passed += 1;
            }
        }
    }

    log::debug!("check_multi_sig: {passed} of {} signatures verified", signatures.len());
    Ok(ByteValue::from_number((passed == signatures.len()) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecdsa::{ecdsa_key_generator_with_rng, ecdsa_sign};
    use crate::hashes::hash256;
    use crate::schnorr::{schnorr_key_generator_with_rng, schnorr_sign};
    use crate::segwit::segwit_sighash;
    use crate::taproot::taproot_sighash;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn template() -> TxData {
        TxData {
            version: "2".to_string(),
            timelock: "0".to_string(),
            inputs: vec![TxInput {
                previous_tx_id: "5e".repeat(32),
                vout: "0".to_string(),
                script_pub_key: "0014".to_string() + &"77".repeat(20),
                sequence: "ffffffff".to_string(),
                amount: "0.25".to_string(),
            }],
            outputs: vec![TxOutput { amount: "0.2499".to_string(), script_pub_key: "51".to_string() }],
            current_input_index: 0,
        }
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_segwit_message_is_single_sha256() {
        let tx = template();
        let message = signature_message(&tx, &SighashContext::segwit()).unwrap();
        let preimage = segwit_serialization(&tx).unwrap();
        assert_eq!(message.bytes(), &sha256(&preimage));
        assert_eq!(sha256(message.bytes()), hash256(&preimage));
    }

    #[test]
    fn test_tapscript_message_is_tap_sighash() {
        let tx = template();
        let context = SighashContext::tapscript(Network::Liquid, vec![0xac]);
        let message = signature_message(&tx, &context).unwrap();
        let expected = taproot_sighash(&tx, &[0xac], Network::Liquid, SighashType::DEFAULT, None).unwrap();
        assert_eq!(message.bytes(), &expected);
    }

    #[test]
    fn test_check_sig_segwit() {
        let backend = Secp256k1Backend::new();
        let keys = ecdsa_key_generator_with_rng(&backend, &mut rng(21)).unwrap();
        let tx = template();
        let digest = ByteValue::from_bytes(segwit_sighash(&tx).unwrap().to_vec());
        let signature = ecdsa_sign(&digest, &keys.private_key).unwrap();

        let context = SighashContext::segwit();
        let result = check_sig(&signature.der_encoded_sign, &keys.public_key, &tx, &context).unwrap();
        assert_eq!(result.number(), Some(1));

        let mut changed = tx.clone();
        changed.outputs[0].amount = "0.2498".to_string();
        let result = check_sig(&signature.der_encoded_sign, &keys.public_key, &changed, &context).unwrap();
        assert_eq!(result.number(), Some(0));
    }

    #[test]
    fn test_check_sig_tapscript() {
        let backend = Secp256k1Backend::new();
        let keys = schnorr_key_generator_with_rng(&backend, &mut rng(22)).unwrap();
        let tx = template();
        let context = SighashContext::tapscript(Network::Bitcoin, vec![0x51]);
        let message = signature_message(&tx, &context).unwrap();
        let signature = schnorr_sign(&message, &keys.private_key).unwrap();

        let result = check_sig(&signature.sign, &keys.public_key, &tx, &context).unwrap();
        assert_eq!(result.number(), Some(1));

        let liquid = SighashContext::tapscript(Network::Liquid, vec![0x51]);
        let result = check_sig(&signature.sign, &keys.public_key, &tx, &liquid).unwrap();
        assert_eq!(result.number(), Some(0));
    }

    #[test]
    fn test_check_sig_propagates_template_errors() {
        let mut tx = template();
        tx.inputs[0].amount.clear();
        let keys = ecdsa_key_generator_with_rng(&Secp256k1Backend::new(), &mut rng(23)).unwrap();
        let signature = ByteValue::from_hex("3006020101020101").unwrap();
        assert_eq!(
            check_sig(&signature, &keys.public_key, &tx, &SighashContext::segwit()),
            Err(crate::error::SighashError::IncompleteTransactionTemplate("amount"))
        );
    }

    #[test]
    fn test_check_multi_sig_two_of_two() {
        let backend = Secp256k1Backend::new();
        let first = ecdsa_key_generator_with_rng(&backend, &mut rng(24)).unwrap();
        let second = ecdsa_key_generator_with_rng(&backend, &mut rng(25)).unwrap();
        let tx = template();
        let digest = ByteValue::from_bytes(segwit_sighash(&tx).unwrap().to_vec());
        let sig_a = ecdsa_sign(&digest, &first.private_key).unwrap().der_encoded_sign;
        let sig_b = ecdsa_sign(&digest, &second.private_key).unwrap().der_encoded_sign;

        let keys = [first.public_key.clone(), second.public_key.clone()];
        let context = SighashContext::segwit();

        let both = check_multi_sig(&keys, &[sig_b.clone(), sig_a.clone()], &tx, &context).unwrap();
        assert_eq!(both.number(), Some(1));

        let foreign = ecdsa_key_generator_with_rng(&backend, &mut rng(26)).unwrap();
        let sig_c = ecdsa_sign(&digest, &foreign.private_key).unwrap().der_encoded_sign;
        let one = check_multi_sig(&keys, &[sig_a, sig_c], &tx, &context).unwrap();
        assert_eq!(one.number(), Some(0));
    }

    #[test]
    fn test_check_multi_sig_counts_cross_product() {
        let backend = Secp256k1Backend::new();
        let keys = ecdsa_key_generator_with_rng(&backend, &mut rng(27)).unwrap();
        let other = ecdsa_key_generator_with_rng(&backend, &mut rng(28)).unwrap();
        let tx = template();
        let digest = ByteValue::from_bytes(segwit_sighash(&tx).unwrap().to_vec());
        let sig = ecdsa_sign(&digest, &keys.private_key).unwrap().der_encoded_sign;
        let other_sig = ecdsa_sign(&digest, &other.private_key).unwrap().der_encoded_sign;

        // one good signature listed against the same key twice counts twice
        let duplicated = [keys.public_key.clone(), keys.public_key.clone()];
        let result = check_multi_sig(&duplicated, &[sig, other_sig], &tx, &SighashContext::segwit()).unwrap();
        assert_eq!(result.number(), Some(1));
    }

    #[test]
    fn test_check_multi_sig_tapscript() {
        let backend = Secp256k1Backend::new();
        let first = schnorr_key_generator_with_rng(&backend, &mut rng(29)).unwrap();
        let second = schnorr_key_generator_with_rng(&backend, &mut rng(30)).unwrap();
        let tx = template();
        let context = SighashContext::tapscript(Network::Bitcoin, vec![0x52, 0xae]);
        let message = signature_message(&tx, &context).unwrap();

        let signatures = [
            schnorr_sign(&message, &first.private_key).unwrap().sign,
            schnorr_sign(&message, &second.private_key).unwrap().sign,
        ];
        let keys = [first.public_key, second.public_key];
        assert_eq!(check_multi_sig(&keys, &signatures, &tx, &context).unwrap().number(), Some(1));
    }

    #[test]
    fn test_check_multi_sig_no_signatures() {
        let result = check_multi_sig(&[], &[], &template(), &SighashContext::segwit()).unwrap();
        assert_eq!(result.number(), Some(1));
    }
}
