//! Shared fixtures for the integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use sighash_core::types::*;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Two inputs, two outputs, signing the first input.
pub fn two_input_template() -> TxData {
    TxData {
        version: "2".to_string(),
        timelock: "500000".to_string(),
        inputs: vec![
            TxInput {
                previous_tx_id: "d1b4a7c0f2e3a1b9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5".to_string(),
                vout: "1".to_string(),
                script_pub_key: "0014".to_string() + &"4d".repeat(20),
                sequence: "fffffffe".to_string(),
                amount: "0.015".to_string(),
            },
            TxInput {
                previous_tx_id: "02".repeat(32),
                vout: "7".to_string(),
                script_pub_key: "5120".to_string() + &"9a".repeat(32),
                sequence: "ffffffff".to_string(),
                amount: "21.00000001".to_string(),
            },
        ],
        outputs: vec![
            TxOutput {
                amount: "21".to_string(),
                script_pub_key: "0014".to_string() + &"e1".repeat(20),
            },
            TxOutput {
                amount: "0.01".to_string(),
                script_pub_key: "6a".to_string(),
            },
        ],
        current_input_index: 0,
    }
}

pub const TEMPLATE_JSON: &str = r#"{
    "version": "2",
    "timelock": "500000",
    "inputs": [
        {
            "previousTxId": "d1b4a7c0f2e3a1b9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5",
            "vout": "1",
            "scriptPubKey": "00144d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d",
            "sequence": "fffffffe",
            "amount": "0.015"
        },
        {
            "previousTxId": "0202020202020202020202020202020202020202020202020202020202020202",
            "vout": "7",
            "scriptPubKey": "51209a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a",
            "sequence": "ffffffff",
            "amount": "21.00000001"
        }
    ],
    "outputs": [
        { "amount": "21", "scriptPubKey": "0014e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1" },
        { "amount": "0.01", "scriptPubKey": "6a" }
    ],
    "currentInputIndex": 0
}"#;
