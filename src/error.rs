//! Error types for sighash construction and signature checks

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SighashError {
    #[error("{0} must not be empty in transaction template")]
    IncompleteTransactionTemplate(&'static str),

    #[error("Invalid {field} in transaction template: {value:?}")]
    InvalidTemplateField { field: &'static str, value: String },

    #[error("Input index {index} out of range ({len} available)")]
    InputIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid hex data: {0}")]
    InvalidHex(String),

    #[error("Invalid public key length")]
    InvalidPublicKeyLength,

    #[error("Invalid signature length")]
    InvalidSignatureLength,

    #[error("Invalid signature encoding")]
    InvalidSignatureEncoding,

    #[error("Tweak length must be 32 bytes")]
    InvalidTweakLength,

    #[error("Internal key length must be 32 bytes")]
    InvalidInternalKeyLength,

    #[error("Tweaked key must start with 0x02 or 0x03")]
    InvalidTweakedKeyPrefix,

    #[error("Private key length must be 32 bytes")]
    InvalidPrivateKeyLength,

    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl From<hex::FromHexError> for SighashError {
    fn from(err: hex::FromHexError) -> Self {
        SighashError::InvalidHex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SighashError>;
