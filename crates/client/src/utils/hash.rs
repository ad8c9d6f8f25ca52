// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use sp_core::H256;
use sp_crypto_hashing::{blake2_128, blake2_256, twox_128};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid hex format: {0}")]
    InvalidHex(String),

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),
}

/// `twox_128(pallet) ++ twox_128(item)`, the prefix of every plain storage item.
pub fn storage_prefix(pallet: &str, item: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&twox_128(pallet.as_bytes()));
    key.extend_from_slice(&twox_128(item.as_bytes()));
    key
}

/// Key of `System.Events`.
pub fn system_events_key() -> Vec<u8> {
    storage_prefix("System", "Events")
}

/// Key of `System.Account` for `account`, using the `Blake2_128Concat` hasher.
pub fn system_account_key(account: &[u8; 32]) -> Vec<u8> {
    let mut key = storage_prefix("System", "Account");
    key.extend_from_slice(&blake2_128(account));
    key.extend_from_slice(account);
    key
}

/// Transaction id: blake2-256 of the length-prefixed extrinsic, 0x-prefixed.
pub fn extrinsic_hash(extrinsic: &[u8]) -> String {
    format!("0x{}", hex::encode(blake2_256(extrinsic)))
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes hex with or without a 0x prefix.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HashError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(stripped).map_err(|e| HashError::InvalidHex(format!("{}: {}", hex_str, e)))
}

/// Parse a hex string into H256
pub fn parse_hash(hex_str: &str) -> Result<H256, HashError> {
    let bytes = decode_hex(hex_str)?;
    if bytes.len() != 32 {
        return Err(HashError::InvalidHex(format!(
            "Expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(H256::from_slice(&bytes))
}

/// Extract a hash field (H256) from JSON
pub fn extract_hash(json: &serde_json::Value, field: &str) -> Result<H256, HashError> {
    let hex_str = json
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HashError::MissingField(field.to_string()))?;

    parse_hash(hex_str)
}

/// Parse a block number from a JSON value.
///
/// Handles both formats returned by different RPC implementations:
/// - Hex string: `"0x1a2b3c"` (standard Substrate nodes)
/// - Numeric: `12345` (Smoldot light client)
pub fn parse_block_number_from_json(value: &serde_json::Value) -> Result<u64, HashError> {
    if let Some(hex_str) = value.as_str() {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        return u64::from_str_radix(hex_str, 16)
            .map_err(|e| HashError::InvalidNumber(format!("invalid hex '{}': {}", hex_str, e)));
    }

    if let Some(num) = value.as_u64() {
        return Ok(num);
    }

    Err(HashError::InvalidNumber(format!(
        "expected hex string or number, got: {}",
        value
    )))
}
