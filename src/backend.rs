//! Elliptic-curve backend behind the signature schemes
//!
//! Call sites only see [`CurveBackend`]; the libsecp256k1 bindings are one
//! implementation of it.

use rand::Rng;
use secp256k1::{
    ecdsa, schnorr, All, Keypair, Message, Parity, PublicKey, Scalar, Secp256k1, SecretKey,
    XOnlyPublicKey,
};

use crate::error::{Result, SighashError};
use crate::types::Hash;

/// Every public encoding of one secret key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyForms {
    pub compressed: [u8; 33],
    pub uncompressed: [u8; 65],
    pub x_only: [u8; 32],
    /// 04 ‖ X ‖ Y of the even-Y point sharing `x_only`
    pub x_only_uncompressed: [u8; 65],
}

pub trait CurveBackend {
    /// Fails with `SigningFailed` for a zero or out-of-range scalar.
    fn derive_public_key(&self, secret_key: &[u8; 32]) -> Result<PublicKeyForms>;

    /// RFC6979 ECDSA over a 32-byte digest, returning compact low-S r ‖ s.
    fn ecdsa_sign(&self, digest: &[u8], secret_key: &[u8; 32]) -> Result<[u8; 64]>;

    /// `Ok(false)` for a signature that does not verify, `Err` if the key cannot be decoded.
    fn ecdsa_verify(&self, digest: &Hash, compact: &[u8; 64], public_key: &[u8]) -> Result<bool>;

    /// BIP340 signing without auxiliary randomness.
    fn schnorr_sign(&self, message: &[u8], secret_key: &[u8; 32]) -> Result<[u8; 64]>;

    fn schnorr_verify(&self, message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> Result<bool>;

    /// lift_x(internal_key) + tweak·G, compressed.
    fn tweak_add(&self, internal_key: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 33]>;
}

/// libsecp256k1 via the `secp256k1` crate.
pub struct Secp256k1Backend {
    secp: Secp256k1<All>,
}

impl Secp256k1Backend {
    pub fn new() -> Self {
        Self { secp: Secp256k1::new() }
    }
}

impl Default for Secp256k1Backend {
    fn default() -> Self {
        Self::new()
    }
}

fn verification_failed(context: &str, err: secp256k1::Error) -> SighashError {
    SighashError::VerificationFailed(format!("{context}: {err}"))
}

fn signing_failed(context: &str, err: secp256k1::Error) -> SighashError {
    SighashError::SigningFailed(format!("{context}: {err}"))
}

impl CurveBackend for Secp256k1Backend {
    fn derive_public_key(&self, secret_key: &[u8; 32]) -> Result<PublicKeyForms> {
        let secret = SecretKey::from_slice(secret_key).map_err(|e| signing_failed("invalid private key", e))?;
        let public = PublicKey::from_secret_key(&self.secp, &secret);
        let (x_only, _parity) = public.x_only_public_key();
        let even = PublicKey::from_x_only_public_key(x_only, Parity::Even);

        Ok(PublicKeyForms {
            compressed: public.serialize(),
            uncompressed: public.serialize_uncompressed(),
            x_only: x_only.serialize(),
            x_only_uncompressed: even.serialize_uncompressed(),
        })
    }

    fn ecdsa_sign(&self, digest: &[u8], secret_key: &[u8; 32]) -> Result<[u8; 64]> {
        let secret = SecretKey::from_slice(secret_key).map_err(|e| signing_failed("invalid private key", e))?;
        let message = Message::from_digest_slice(digest).map_err(|e| signing_failed("invalid message", e))?;
        Ok(self.secp.sign_ecdsa(&message, &secret).serialize_compact())
    }

    fn ecdsa_verify(&self, digest: &Hash, compact: &[u8; 64], public_key: &[u8]) -> Result<bool> {
        let pubkey = PublicKey::from_slice(public_key).map_err(|e| verification_failed("invalid public key", e))?;

        // r or s not below the curve order can never verify
        let mut signature = match ecdsa::Signature::from_compact(compact) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };
        // libsecp256k1 only accepts low-S; plain ECDSA accepts both halves
        signature.normalize_s();

        let message = Message::from_digest_slice(digest).map_err(|e| verification_failed("invalid message", e))?;
        Ok(self.secp.verify_ecdsa(&message, &signature, &pubkey).is_ok())
    }

    fn schnorr_sign(&self, message: &[u8], secret_key: &[u8; 32]) -> Result<[u8; 64]> {
        let keypair = Keypair::from_seckey_slice(&self.secp, secret_key)
            .map_err(|e| signing_failed("invalid private key", e))?;
        let message = Message::from_digest_slice(message).map_err(|e| signing_failed("invalid message", e))?;
        let signature = self.secp.sign_schnorr_no_aux_rand(&message, &keypair);
        let bytes: &[u8; 64] = signature.as_ref();
        Ok(*bytes)
    }

    fn schnorr_verify(&self, message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> Result<bool> {
        let pubkey = XOnlyPublicKey::from_slice(public_key).map_err(|e| verification_failed("invalid public key", e))?;
        let signature = schnorr::Signature::from_slice(signature)
            .map_err(|e| verification_failed("invalid signature", e))?;
        let message = Message::from_digest_slice(message).map_err(|e| verification_failed("invalid message", e))?;
        Ok(self.secp.verify_schnorr(&signature, &message, &pubkey).is_ok())
    }

    fn tweak_add(&self, internal_key: &[u8; 32], tweak: &[u8; 32]) -> Result<[u8; 33]> {
        let internal = XOnlyPublicKey::from_slice(internal_key)
            .map_err(|e| verification_failed("invalid internal key", e))?;
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| {
            SighashError::VerificationFailed("tweak is not below the curve order".to_string())
        })?;

        let full = PublicKey::from_x_only_public_key(internal, Parity::Even);
        let tweaked = full
            .add_exp_tweak(&self.secp, &scalar)
            .map_err(|e| verification_failed("failed to compute tweaked public key", e))?;
        Ok(tweaked.serialize())
    }
}

/// Candidate scalars drawn before key generation gives up
pub const MAX_KEY_ATTEMPTS: usize = 128;

/// Draw private keys from `rng` until one is a valid scalar for `backend`.
///
/// Fails with `SigningFailed` after [`MAX_KEY_ATTEMPTS`] rejected candidates.
pub fn random_secret_key<B, R>(backend: &B, rng: &mut R) -> Result<([u8; 32], PublicKeyForms)>
where
    B: CurveBackend + ?Sized,
    R: Rng + ?Sized,
{
    for _ in 0..MAX_KEY_ATTEMPTS {
        let mut candidate = [0u8; 32];
        rng.fill_bytes(&mut candidate);
        if let Ok(forms) = backend.derive_public_key(&candidate) {
            return Ok((candidate, forms));
        }
    }
    log::warn!("no valid private key after {} candidates", MAX_KEY_ATTEMPTS);
    Err(SighashError::SigningFailed(format!(
        "no valid private key after {MAX_KEY_ATTEMPTS} candidates"
    )))
}
