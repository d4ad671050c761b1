//! Digest primitives and taproot tagged hashes

use bitcoin_hashes::{sha1, sha256d, Hash as BitcoinHash, HashEngine};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::constants::TAG_TAP_LEAF;
use crate::encoding::compact_size;
use crate::types::Hash;

/// SHA-1, retained for the legacy OP_SHA1 path
pub fn sha1(data: &[u8]) -> [u8; 20] {
    sha1::Hash::hash(data).into_inner()
}

pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// HASH160(d) = RIPEMD160(SHA256(d))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha256_hash = Sha256::digest(data);
    Ripemd160::digest(sha256_hash).into()
}

/// HASH256(d) = SHA256(SHA256(d))
pub fn hash256(data: &[u8]) -> Hash {
    let mut hasher = sha256d::Hash::engine();
    hasher.input(data);
    sha256d::Hash::from_engine(hasher).into_inner()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

pub fn hash160_hex(data: &[u8]) -> String {
    hex::encode(hash160(data))
}

/// BIP340 tagged hash: SHA256(SHA256(tag) ‖ SHA256(tag) ‖ data)
pub fn tag_hash(tag: &str, data: &[u8]) -> Hash {
    let tag_digest = Sha256::digest(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(&tag_digest);
    hasher.update(&tag_digest);
    hasher.update(data);
    hasher.finalize().into()
}

/// TapLeaf hash: tagged("TapLeaf", leaf_version ‖ compact_size(|script|) ‖ script)
pub fn tap_leaf(script: &[u8], leaf_version: u8) -> Hash {
    let mut leaf = Vec::with_capacity(1 + 9 + script.len());
    leaf.push(leaf_version);
    leaf.extend_from_slice(&compact_size(script.len() as u64));
    leaf.extend_from_slice(script);
    tag_hash(TAG_TAP_LEAF, &leaf)
}
