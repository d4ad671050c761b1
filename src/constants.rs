//! Protocol constants for sighash construction and signature checks

/// Satoshis per whole coin
pub const SATOSHIS_PER_COIN: u64 = 100_000_000;

/// Decimal places in a whole-coin amount string
pub const AMOUNT_DECIMALS: usize = 8;

/// BIP341 default sighash (taproot only)
pub const SIGHASH_DEFAULT: u8 = 0x00;

pub const SIGHASH_ALL: u8 = 0x01;

pub const SIGHASH_NONE: u8 = 0x02;

pub const SIGHASH_SINGLE: u8 = 0x03;

pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Mask selecting the output commitment mode from a sighash byte
pub const SIGHASH_OUTPUT_MASK: u8 = 0x1f;

/// Sighash type trailer of the segwit preimage (SIGHASH_ALL, 4 bytes LE)
pub const SEGWIT_SIGHASH_TRAILER: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Taproot sighash epoch
pub const TAPROOT_SIGHASH_EPOCH: u8 = 0x00;

/// spend_type: script path (ext_flag = 1), no annex
pub const TAPROOT_SPEND_TYPE_SCRIPT: u8 = 0x02;

/// key_version for BIP342 tapscript
pub const TAPROOT_KEY_VERSION: u8 = 0x00;

/// Code separator position when no OP_CODESEPARATOR was executed
pub const NO_CODE_SEPARATOR: u32 = 0xffff_ffff;

/// Tapscript leaf version on Bitcoin
pub const TAPROOT_LEAF_TAPSCRIPT: u8 = 0xc0;

/// Tapscript leaf version on Elements/Liquid
pub const TAPROOT_LEAF_TAPSCRIPT_ELEMENTS: u8 = 0xc4;

pub const TAG_TAP_SIGHASH: &str = "TapSighash";

pub const TAG_TAP_LEAF: &str = "TapLeaf";

pub const TAG_TAP_TWEAK: &str = "TapTweak";

/// Compressed public key size
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;

/// Uncompressed public key size (04 ‖ X ‖ Y)
pub const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;

/// x-only public key size
pub const XONLY_PUBKEY_SIZE: usize = 32;

pub const PRIVATE_KEY_SIZE: usize = 32;

pub const SCHNORR_SIGNATURE_SIZE: usize = 64;

/// Compact ECDSA signature size (r ‖ s)
pub const COMPACT_SIGNATURE_SIZE: usize = 64;

/// DER tags
pub const DER_SEQUENCE_TAG: u8 = 0x30;
pub const DER_INTEGER_TAG: u8 = 0x02;
