//! # Sighash-Core
//!
//! Signature messages and signature checks for Bitcoin and Elements script
//! evaluation.
//!
//! This crate computes the exact byte sequences a transaction input signs
//! (BIP143 for segwit, BIP341 for tapscript), and verifies ECDSA and BIP340
//! Schnorr signatures over them. It backs the CHECKSIG, CHECKMULTISIG and
//! TWEAKVERIFY opcodes of a script VM evaluating against a transaction template.
//!
//! ## Architecture
//!
//! Leaf-first:
//! - Digest primitives (`hashes`)
//! - Signature schemes (`ecdsa`, `schnorr`, `der`) over a curve backend (`backend`)
//! - Taproot tweak check and signature message (`taproot`)
//! - Segwit signature message (`segwit`)
//! - Signature-check dispatch (`script`)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation except key generation is deterministic
//! 2. **Bit-exact Preimages**: serializers reproduce the protocol byte layouts
//! 3. **Exact Version Pinning**: curve and hash dependencies are pinned to exact versions
//! 4. **Typed Failures**: malformed input is a [`SighashError`], never a 0 result
//!
//! ## Usage
//!
//! ```rust
//! use sighash_core::SighashCore;
//! use sighash_core::types::*;
//!
//! let core = SighashCore::new();
//! let tx = TxData {
//!     version: "2".to_string(),
//!     timelock: "0".to_string(),
//!     inputs: vec![TxInput {
//!         previous_tx_id: "11".repeat(32),
//!         vout: "0".to_string(),
//!         script_pub_key: "51".to_string(),
//!         sequence: "ffffffff".to_string(),
//!         amount: "1".to_string(),
//!     }],
//!     outputs: vec![TxOutput {
//!         amount: "0.9".to_string(),
//!         script_pub_key: "51".to_string(),
//!     }],
//!     current_input_index: 0,
//! };
//! let preimage = core.segwit_serialization(&tx).unwrap();
//! assert_eq!(preimage.len(), 158);
//! ```

pub mod types;
pub mod constants;
pub mod error;
pub mod value;
pub mod hashes;
pub mod encoding;
pub mod der;
pub mod backend;
pub mod ecdsa;
pub mod schnorr;
pub mod segwit;
pub mod taproot;
pub mod script;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use error::{Result, SighashError};
pub use value::ByteValue;

/// Main sighash core implementation
///
/// # Examples
///
/// ```
/// use sighash_core::SighashCore;
/// use sighash_core::types::*;
///
/// let core = SighashCore::new();
/// let keys = core.ecdsa_key_generator().unwrap();
///
/// let tx = TxData {
///     version: "2".to_string(),
///     timelock: "0".to_string(),
///     inputs: vec![TxInput {
///         previous_tx_id: "aa".repeat(32),
///         vout: "1".to_string(),
///         script_pub_key: "0014".to_string() + &"bb".repeat(20),
///         sequence: "ffffffff".to_string(),
///         amount: "0.5".to_string(),
///     }],
///     outputs: vec![TxOutput {
///         amount: "0.4999".to_string(),
///         script_pub_key: "51".to_string(),
///     }],
///     current_input_index: 0,
/// };
///
/// // Sign the BIP143 sighash and check it the way OP_CHECKSIG does
/// let sighash = core.segwit_sighash(&tx).unwrap();
/// let digest = sighash_core::ByteValue::from_bytes(sighash.to_vec());
/// let signature = core.ecdsa_sign(&digest, &keys.private_key).unwrap();
///
/// let context = SighashContext::segwit();
/// let result = core.check_sig(&signature.der_encoded_sign, &keys.public_key, &tx, &context).unwrap();
/// assert_eq!(result.number(), Some(1));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SighashCore;

impl SighashCore {
    /// Create a new sighash core instance
    ///
    /// # Examples
    ///
    /// ```
    /// use sighash_core::SighashCore;
    ///
    /// let core = SighashCore::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// SHA-256 digest
    ///
    /// # Examples
    ///
    /// ```
    /// use sighash_core::SighashCore;
    ///
    /// let core = SighashCore::new();
    /// assert_eq!(
    ///     hex::encode(core.sha256(b"abc")),
    ///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    /// );
    /// ```
    pub fn sha256(&self, data: &[u8]) -> types::Hash {
        hashes::sha256(data)
    }

    /// Double SHA-256 digest
    pub fn hash256(&self, data: &[u8]) -> types::Hash {
        hashes::hash256(data)
    }

    /// RIPEMD160(SHA256(data))
    pub fn hash160(&self, data: &[u8]) -> [u8; 20] {
        hashes::hash160(data)
    }

    /// BIP340 tagged hash
    ///
    /// # Examples
    ///
    /// ```
    /// use sighash_core::SighashCore;
    ///
    /// let core = SighashCore::new();
    /// let tweak = core.tag_hash("TapTweak", &[0u8; 32]);
    /// assert_eq!(tweak.len(), 32);
    /// ```
    pub fn tag_hash(&self, tag: &str, data: &[u8]) -> types::Hash {
        hashes::tag_hash(tag, data)
    }

    /// Verify a DER ECDSA signature over `message` (hashed once more by the verifier)
    pub fn ecdsa_verify(&self, signature: &ByteValue, message: &ByteValue, public_key: &ByteValue) -> Result<ByteValue> {
        ecdsa::ecdsa_verify(signature, message, public_key)
    }

    /// Fresh ECDSA key pair
    pub fn ecdsa_key_generator(&self) -> Result<KeyPair> {
        ecdsa::ecdsa_key_generator()
    }

    /// Sign a 32-byte digest with ECDSA
    pub fn ecdsa_sign(&self, message: &ByteValue, private_key: &ByteValue) -> Result<Signature> {
        ecdsa::ecdsa_sign(message, private_key)
    }

    /// Verify a BIP340 signature
    ///
    /// # Examples
    ///
    /// ```
    /// use sighash_core::{ByteValue, SighashCore};
    ///
    /// let core = SighashCore::new();
    /// let keys = core.schnorr_key_generator().unwrap();
    /// let message = ByteValue::from_bytes(core.tag_hash("TapSighash", b"preimage").to_vec());
    ///
    /// let signature = core.schnorr_sign(&message, &keys.private_key).unwrap();
    /// let result = core.schnorr_verify(&signature.sign, &message, &keys.public_key).unwrap();
    /// assert_eq!(result.number(), Some(1));
    /// ```
    pub fn schnorr_verify(&self, signature: &ByteValue, message: &ByteValue, public_key: &ByteValue) -> Result<ByteValue> {
        schnorr::schnorr_verify(signature, message, public_key)
    }

    /// Fresh Schnorr key pair with an x-only public key
    pub fn schnorr_key_generator(&self) -> Result<KeyPair> {
        schnorr::schnorr_key_generator()
    }

    /// Sign a 32-byte message with BIP340
    pub fn schnorr_sign(&self, message: &ByteValue, private_key: &ByteValue) -> Result<Signature> {
        schnorr::schnorr_sign(message, private_key)
    }

    /// Check a taproot output key against its internal key and tweak
    ///
    /// # Examples
    ///
    /// ```
    /// use sighash_core::{ByteValue, SighashCore};
    ///
    /// let core = SighashCore::new();
    /// let internal = ByteValue::from_hex(
    ///     "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    /// ).unwrap();
    /// let tweak = ByteValue::from_bytes(core.tag_hash("TapTweak", internal.bytes()).to_vec());
    /// let tweaked = ByteValue::from_hex(
    ///     "03da4710964f7852695de2da025290e24af6d8c281de5a0b902b7135fd9fd74d21",
    /// ).unwrap();
    ///
    /// let result = core.tweak_verify(&tweaked, &tweak, &internal).unwrap();
    /// assert_eq!(result.number(), Some(1));
    /// ```
    pub fn tweak_verify(&self, tweaked_key: &ByteValue, tweak: &ByteValue, internal_key: &ByteValue) -> Result<ByteValue> {
        taproot::tweak_verify(tweaked_key, tweak, internal_key)
    }

    /// BIP143 preimage for the template's current input
    pub fn segwit_serialization(&self, tx: &TxData) -> Result<Vec<u8>> {
        segwit::segwit_serialization(tx)
    }

    /// BIP143 sighash (HASH256 of the preimage)
    pub fn segwit_sighash(&self, tx: &TxData) -> Result<types::Hash> {
        segwit::segwit_sighash(tx)
    }

    /// BIP341 tapscript preimage for the template's current input
    pub fn taproot_serialization(
        &self,
        tx: &TxData,
        leaf_script: &[u8],
        network: Network,
        sighash_type: SighashType,
        code_separator_position: Option<u32>,
    ) -> Result<Vec<u8>> {
        taproot::taproot_serialization(tx, leaf_script, network, sighash_type, code_separator_position)
    }

    /// OP_CHECKSIG against the template
    pub fn check_sig(
        &self,
        signature: &ByteValue,
        public_key: &ByteValue,
        tx: &TxData,
        context: &SighashContext,
    ) -> Result<ByteValue> {
        script::check_sig(signature, public_key, tx, context)
    }

    /// OP_CHECKMULTISIG against the template
    pub fn check_multi_sig(
        &self,
        public_keys: &[ByteValue],
        signatures: &[ByteValue],
        tx: &TxData,
        context: &SighashContext,
    ) -> Result<ByteValue> {
        script::check_multi_sig(public_keys, signatures, tx, context)
    }
}
