// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Records produced by block reconstruction.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Transfer,
}

/// Dispatch outcome. Failed extrinsics emit no `Transfer` event, so every
/// reconstructed record is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
}

/// One balance transfer, correlated with the extrinsic that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtrinsicRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    /// blake2-256 of the length-prefixed extrinsic.
    pub txid: String,
    pub from_address: String,
    pub to_address: String,
    /// Decimal amount in the chain's smallest unit.
    pub amount: String,
    /// Decimal `partialFee` as reported by the node at the parent block.
    pub fee: String,
    pub signature: String,
    pub nonce: u64,
    pub era: String,
    pub extrinsic_index: u32,
    /// Index of the extrinsic whose application emitted the transfer event.
    pub event_index: usize,
    /// Encoded length without the compact length prefix.
    pub extrinsic_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockResponse {
    pub height: u64,
    pub parent_hash: String,
    pub block_hash: String,
    /// Unix seconds; 0 for blocks without extrinsics.
    pub timestamp: u64,
    pub extrinsic: Vec<ExtrinsicRecord>,
}
