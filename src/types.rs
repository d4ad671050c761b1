//! Transaction template and signing types consumed by the signature checks

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, SighashError};
use crate::value::ByteValue;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Transaction Input as supplied by the VM template.
///
/// Every field is kept in its textual form; encoding into wire bytes happens at
/// serialization time so that a missing field is reported against its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxInput {
    /// Previous transaction id, hex in big-endian display order
    pub previous_tx_id: String,
    /// Output index in the previous transaction, decimal
    pub vout: String,
    /// Script of the spent output, hex
    pub script_pub_key: String,
    /// nSequence, 4 bytes hex in big-endian display order
    pub sequence: String,
    /// Value of the spent output in whole coins, decimal
    pub amount: String,
}

/// Transaction Output as supplied by the VM template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOutput {
    /// Value in whole coins, decimal
    pub amount: String,
    /// Locking script, hex
    pub script_pub_key: String,
}

/// Transaction template: version × inputs × outputs × timelock, plus the index
/// of the input being signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxData {
    pub version: String,
    pub timelock: String,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub current_input_index: usize,
}

impl TxData {
    /// Load a template from its JSON form (`previousTxId`, `scriptPubKey`, ...).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SighashError::InvalidTemplateField {
            field: "template",
            value: e.to_string(),
        })
    }

    /// The input at `current_input_index`.
    pub fn current_input(&self) -> Result<&TxInput> {
        self.inputs
            .get(self.current_input_index)
            .ok_or(SighashError::InputIndexOutOfRange {
                index: self.current_input_index,
                len: self.inputs.len(),
            })
    }
}

/// Sighash flag byte.
///
/// Only the base type matters to the serializers; ANYONECANPAY is carried through
/// into the taproot preimage unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SighashType(pub u8);

impl SighashType {
    pub const DEFAULT: SighashType = SighashType(SIGHASH_DEFAULT);
    pub const ALL: SighashType = SighashType(SIGHASH_ALL);
    pub const NONE: SighashType = SighashType(SIGHASH_NONE);
    pub const SINGLE: SighashType = SighashType(SIGHASH_SINGLE);

    pub fn with_anyone_can_pay(self) -> Self {
        SighashType(self.0 | SIGHASH_ANYONECANPAY)
    }

    pub fn is_anyone_can_pay(self) -> bool {
        self.0 & SIGHASH_ANYONECANPAY != 0
    }

    /// Whether only the output at the signing input's index is committed to.
    pub fn is_single(self) -> bool {
        self.0 & SIGHASH_OUTPUT_MASK == SIGHASH_SINGLE
    }

    pub fn to_u8(self) -> u8 {
        self.0
    }
}

impl Default for SighashType {
    fn default() -> Self {
        SighashType::ALL
    }
}

/// Chain the tapscript leaf belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Bitcoin,
    Liquid,
}

impl Network {
    /// Tapscript leaf version byte used in the tap leaf hash
    pub fn leaf_version(self) -> u8 {
        match self {
            Network::Bitcoin => TAPROOT_LEAF_TAPSCRIPT,
            Network::Liquid => TAPROOT_LEAF_TAPSCRIPT_ELEMENTS,
        }
    }
}

/// Script version selecting the serialization and signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkVersion {
    Segwit,
    Tapscript(Network),
}

impl NetworkVersion {
    pub fn is_tapscript(self) -> bool {
        matches!(self, NetworkVersion::Tapscript(_))
    }
}

/// Everything besides the template that a signature check needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SighashContext {
    pub version: NetworkVersion,
    #[serde(default)]
    pub sighash_type: SighashType,
    /// Tapscript leaf being executed, committed via the tap leaf hash.
    /// Hex string on the wire.
    #[serde(default, with = "hex::serde")]
    pub leaf_script: ByteString,
    /// Opcode position of the last executed OP_CODESEPARATOR
    #[serde(default)]
    pub code_separator_position: Option<u32>,
}

impl SighashContext {
    pub fn segwit() -> Self {
        SighashContext {
            version: NetworkVersion::Segwit,
            sighash_type: SighashType::ALL,
            leaf_script: Vec::new(),
            code_separator_position: None,
        }
    }

    pub fn tapscript(network: Network, leaf_script: ByteString) -> Self {
        SighashContext {
            version: NetworkVersion::Tapscript(network),
            sighash_type: SighashType::DEFAULT,
            leaf_script,
            code_separator_position: None,
        }
    }

    pub fn with_sighash_type(mut self, sighash_type: SighashType) -> Self {
        self.sighash_type = sighash_type;
        self
    }

    pub fn with_code_separator(mut self, position: u32) -> Self {
        self.code_separator_position = Some(position);
        self
    }
}

/// Freshly generated or derived key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: ByteValue,
    /// 33-byte compressed key for ECDSA, 32-byte x-only key for Schnorr
    pub public_key: ByteValue,
    /// 04 ‖ X ‖ Y
    pub uncompressed_pub_key: ByteValue,
}

/// Signature output of the signing helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// 64-byte r ‖ s (ECDSA compact) or BIP340 signature
    pub sign: ByteValue,
    /// DER encoding of the two 32-byte halves
    pub der_encoded_sign: ByteValue,
}
