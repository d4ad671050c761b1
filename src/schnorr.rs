//! BIP340 Schnorr verification, signing and key generation

use rand::Rng;

use crate::backend::{random_secret_key, CurveBackend, PublicKeyForms, Secp256k1Backend};
use crate::constants::{SCHNORR_SIGNATURE_SIZE, XONLY_PUBKEY_SIZE};
use crate::der::encode_der;
use crate::ecdsa::private_key_bytes;
use crate::error::{Result, SighashError};
use crate::types::{KeyPair, Signature};
use crate::value::ByteValue;

/// Verify a 64-byte BIP340 signature against a 32-byte x-only key.
pub fn schnorr_verify(signature: &ByteValue, message: &ByteValue, public_key: &ByteValue) -> Result<ByteValue> {
    schnorr_verify_with(&Secp256k1Backend::new(), signature, message, public_key)
}

pub fn schnorr_verify_with<B: CurveBackend + ?Sized>(
    backend: &B,
    signature: &ByteValue,
    message: &ByteValue,
    public_key: &ByteValue,
) -> Result<ByteValue> {
    let public_key: [u8; XONLY_PUBKEY_SIZE] = public_key
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidPublicKeyLength)?;
    let signature: [u8; SCHNORR_SIGNATURE_SIZE] = signature
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidSignatureLength)?;

    let valid = backend
        .schnorr_verify(message.bytes(), &signature, &public_key)
        .map_err(|e| {
            log::warn!("Schnorr backend fault for key {}: {}", hex::encode(public_key), e);
            e
        })?;
    Ok(ByteValue::from_number(valid as i64))
}

fn key_pair(private_key: [u8; 32], forms: &PublicKeyForms) -> KeyPair {
    KeyPair {
        private_key: ByteValue::from_bytes(private_key.to_vec()),
        public_key: ByteValue::from_bytes(forms.x_only.to_vec()),
        uncompressed_pub_key: ByteValue::from_bytes(forms.x_only_uncompressed.to_vec()),
    }
}

pub fn schnorr_key_generator() -> Result<KeyPair> {
    schnorr_key_generator_with_rng(&Secp256k1Backend::new(), &mut rand::thread_rng())
}

pub fn schnorr_key_generator_with_rng<B, R>(backend: &B, rng: &mut R) -> Result<KeyPair>
where
    B: CurveBackend + ?Sized,
    R: Rng + ?Sized,
{
    let (secret, forms) = random_secret_key(backend, rng)?;
    Ok(key_pair(secret, &forms))
}

pub fn schnorr_create_public_key(private_key: &ByteValue) -> Result<KeyPair> {
    let secret = private_key_bytes(private_key)?;
    let forms = Secp256k1Backend::new().derive_public_key(&secret)?;
    Ok(key_pair(secret, &forms))
}

/// Deterministic BIP340 signature over a 32-byte message.
pub fn schnorr_sign(message: &ByteValue, private_key: &ByteValue) -> Result<Signature> {
    schnorr_sign_with(&Secp256k1Backend::new(), message, private_key)
}

pub fn schnorr_sign_with<B: CurveBackend + ?Sized>(
    backend: &B,
    message: &ByteValue,
    private_key: &ByteValue,
) -> Result<Signature> {
    let secret = private_key_bytes(private_key)?;
    let signature = backend.schnorr_sign(message.bytes(), &secret)?;

    Ok(Signature {
        sign: ByteValue::from_bytes(signature.to_vec()),
        der_encoded_sign: ByteValue::from_bytes(encode_der(&signature)),
    })
}
