//! ECDSA over secp256k1: DER verification, signing and key generation

use rand::Rng;

use crate::backend::{random_secret_key, CurveBackend, PublicKeyForms, Secp256k1Backend};
use crate::constants::{COMPACT_SIGNATURE_SIZE, COMPRESSED_PUBKEY_SIZE, PRIVATE_KEY_SIZE};
use crate::der::{decode_der, encode_der};
use crate::error::{Result, SighashError};
use crate::hashes::sha256;
use crate::types::{KeyPair, Signature};
use crate::value::ByteValue;

/// Verify a DER signature over `message`.
///
/// The message is SHA-256 hashed here before the curve check, so a caller
/// passing SHA256(preimage) verifies against HASH256(preimage).
///
/// Returns 1 for a valid signature and 0 for an invalid one. Malformed keys or
/// signatures are errors, never 0.
pub fn ecdsa_verify(signature: &ByteValue, message: &ByteValue, public_key: &ByteValue) -> Result<ByteValue> {
    ecdsa_verify_with(&Secp256k1Backend::new(), signature, message, public_key)
}

pub fn ecdsa_verify_with<B: CurveBackend + ?Sized>(
    backend: &B,
    signature: &ByteValue,
    message: &ByteValue,
    public_key: &ByteValue,
) -> Result<ByteValue> {
    if public_key.len() != COMPRESSED_PUBKEY_SIZE {
        return Err(SighashError::InvalidPublicKeyLength);
    }

    let der = decode_der(signature.bytes())?;
    let digest = sha256(message.bytes());

    let compact = match der.to_compact() {
        Some(compact) => compact,
        None => return Ok(ByteValue::from_number(0)),
    };

    let valid = backend
        .ecdsa_verify(&digest, &compact, public_key.bytes())
        .map_err(|e| {
            log::warn!("ECDSA backend fault for key {}: {}", public_key.hex(), e);
            e
        })?;
    Ok(ByteValue::from_number(valid as i64))
}

/// Verify a 64-byte compact signature over a 32-byte digest, without hashing.
pub fn ecdsa_verify_digest(message: &ByteValue, signature: &ByteValue, public_key: &ByteValue) -> Result<ByteValue> {
    let compact: [u8; COMPACT_SIGNATURE_SIZE] = signature
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidSignatureLength)?;
    let digest: [u8; 32] = message
        .bytes()
        .try_into()
        .map_err(|_| SighashError::VerificationFailed("message must be a 32-byte digest".to_string()))?;

    let valid = Secp256k1Backend::new().ecdsa_verify(&digest, &compact, public_key.bytes())?;
    Ok(ByteValue::from_number(valid as i64))
}

pub(crate) fn private_key_bytes(private_key: &ByteValue) -> Result<[u8; PRIVATE_KEY_SIZE]> {
    private_key
        .bytes()
        .try_into()
        .map_err(|_| SighashError::InvalidPrivateKeyLength)
}

fn key_pair(private_key: [u8; 32], forms: &PublicKeyForms) -> KeyPair {
    KeyPair {
        private_key: ByteValue::from_bytes(private_key.to_vec()),
        public_key: ByteValue::from_bytes(forms.compressed.to_vec()),
        uncompressed_pub_key: ByteValue::from_bytes(forms.uncompressed.to_vec()),
    }
}

/// Fresh secp256k1 key pair from the thread-local CSPRNG.
pub fn ecdsa_key_generator() -> Result<KeyPair> {
    ecdsa_key_generator_with_rng(&Secp256k1Backend::new(), &mut rand::thread_rng())
}

pub fn ecdsa_key_generator_with_rng<B, R>(backend: &B, rng: &mut R) -> Result<KeyPair>
where
    B: CurveBackend + ?Sized,
    R: Rng + ?Sized,
{
    let (secret, forms) = random_secret_key(backend, rng)?;
    Ok(key_pair(secret, &forms))
}

/// Public keys for an existing private key.
pub fn ecdsa_create_public_key(private_key: &ByteValue) -> Result<KeyPair> {
    let secret = private_key_bytes(private_key)?;
    let forms = Secp256k1Backend::new().derive_public_key(&secret)?;
    Ok(key_pair(secret, &forms))
}

/// Sign a 32-byte digest, returning compact and DER forms.
pub fn ecdsa_sign(message: &ByteValue, private_key: &ByteValue) -> Result<Signature> {
    ecdsa_sign_with(&Secp256k1Backend::new(), message, private_key)
}

pub fn ecdsa_sign_with<B: CurveBackend + ?Sized>(
    backend: &B,
    message: &ByteValue,
    private_key: &ByteValue,
) -> Result<Signature> {
    let secret = private_key_bytes(private_key)?;
    let compact = backend.ecdsa_sign(message.bytes(), &secret)?;

    Ok(Signature {
        sign: ByteValue::from_bytes(compact.to_vec()),
        der_encoded_sign: ByteValue::from_bytes(encode_der(&compact)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_keys(seed: u64) -> KeyPair {
        ecdsa_key_generator_with_rng(&Secp256k1Backend::new(), &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_key_generator_shapes() {
        let keys = ecdsa_key_generator().unwrap();
        assert_eq!(keys.private_key.len(), 32);
        assert_eq!(keys.public_key.len(), 33);
        assert!(matches!(keys.public_key.bytes()[0], 0x02 | 0x03));
        assert_eq!(keys.uncompressed_pub_key.len(), 65);
        assert_eq!(keys.uncompressed_pub_key.bytes()[0], 0x04);
        assert_eq!(&keys.uncompressed_pub_key.bytes()[1..33], &keys.public_key.bytes()[1..]);
    }

    #[test]
    fn test_create_public_key_matches_generator() {
        let keys = seeded_keys(1);
        assert_eq!(ecdsa_create_public_key(&keys.private_key).unwrap(), keys);
    }

    #[test]
    fn test_sign_and_verify() {
        let keys = seeded_keys(2);
        let message = ByteValue::from_bytes(b"spend".to_vec());
        let digest = ByteValue::from_bytes(sha256(message.bytes()).to_vec());

        let signature = ecdsa_sign(&digest, &keys.private_key).unwrap();
        assert_eq!(signature.sign.len(), 64);
        assert_eq!(signature.der_encoded_sign.bytes()[0], 0x30);

        let result = ecdsa_verify(&signature.der_encoded_sign, &message, &keys.public_key).unwrap();
        assert_eq!(result.number(), Some(1));
        let raw = ecdsa_verify_digest(&digest, &signature.sign, &keys.public_key).unwrap();
        assert_eq!(raw.number(), Some(1));
    }

    #[test]
    fn test_verify_wrong_message() {
        let keys = seeded_keys(3);
        let digest = ByteValue::from_bytes(sha256(b"one").to_vec());
        let signature = ecdsa_sign(&digest, &keys.private_key).unwrap();

        let other = ByteValue::from_bytes(b"two".to_vec());
        let result = ecdsa_verify(&signature.der_encoded_sign, &other, &keys.public_key).unwrap();
        assert_eq!(result.number(), Some(0));
    }

    #[test]
    fn test_verify_accepts_high_s() {
        // n - s flips a low-S signature to its high-S twin
        const ORDER: [u8; 32] = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
            0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
        ];
        let keys = seeded_keys(4);
        let message = ByteValue::from_bytes(b"high-s".to_vec());
        let digest = ByteValue::from_bytes(sha256(message.bytes()).to_vec());
        let signature = ecdsa_sign(&digest, &keys.private_key).unwrap();

        let mut compact: [u8; 64] = signature.sign.bytes().try_into().unwrap();
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let diff = ORDER[i] as i16 - compact[32 + i] as i16 - borrow;
            borrow = (diff < 0) as i16;
            compact[32 + i] = (diff + 256 * borrow) as u8;
        }
        let high_s = ByteValue::from_bytes(encode_der(&compact));
        let result = ecdsa_verify(&high_s, &message, &keys.public_key).unwrap();
        assert_eq!(result.number(), Some(1));
    }

    #[test]
    fn test_verify_public_key_length() {
        let signature = ByteValue::from_hex("3006020101020101").unwrap();
        let message = ByteValue::from_bytes(vec![1]);
        for len in [32usize, 34] {
            let key = ByteValue::from_bytes(vec![0x02; len]);
            assert_eq!(
                ecdsa_verify(&signature, &message, &key),
                Err(SighashError::InvalidPublicKeyLength)
            );
        }
    }

    #[test]
    fn test_verify_signature_shape_errors() {
        let keys = seeded_keys(5);
        let message = ByteValue::from_bytes(vec![1]);
        let no_tag = ByteValue::from_hex("3106020101020101").unwrap();
        assert_eq!(
            ecdsa_verify(&no_tag, &message, &keys.public_key),
            Err(SighashError::InvalidSignatureEncoding)
        );
        let bad_len = ByteValue::from_hex("3007020101020101").unwrap();
        assert_eq!(
            ecdsa_verify(&bad_len, &message, &keys.public_key),
            Err(SighashError::InvalidSignatureLength)
        );
    }

    #[test]
    fn test_verify_undecodable_key_is_fault() {
        let signature = ByteValue::from_hex("3006020101020101").unwrap();
        let message = ByteValue::from_bytes(vec![1]);
        let key = ByteValue::from_bytes(vec![0x05; 33]);
        assert!(matches!(
            ecdsa_verify(&signature, &message, &key),
            Err(SighashError::VerificationFailed(_))
        ));
    }

    #[test]
    fn test_sign_private_key_length() {
        let digest = ByteValue::from_bytes(vec![1u8; 32]);
        assert_eq!(
            ecdsa_sign(&digest, &ByteValue::from_bytes(vec![1u8; 31])),
            Err(SighashError::InvalidPrivateKeyLength)
        );
        assert_eq!(
            ecdsa_create_public_key(&ByteValue::from_bytes(vec![1u8; 33])),
            Err(SighashError::InvalidPrivateKeyLength)
        );
    }

    #[test]
    fn test_sign_rejects_non_digest_message() {
        let keys = seeded_keys(6);
        let result = ecdsa_sign(&ByteValue::from_bytes(b"not a digest".to_vec()), &keys.private_key);
        assert!(matches!(result, Err(SighashError::SigningFailed(_))));
    }
}
