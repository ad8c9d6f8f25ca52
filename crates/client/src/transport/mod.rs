// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Node access used by the client.
//!
//! [`Transport`] is the seam between the client and the network.
//! [`RpcTransport`] implements it over the legacy JSON-RPC methods.

mod rpc;

pub use rpc::RpcTransport;

use crate::error::TransportError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sp_core::H256;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
    pub transaction_version: u32,
}

/// A block body as returned by the node. Extrinsics keep their length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub number: u64,
    pub hash: H256,
    pub parent_hash: H256,
    pub extrinsics: Vec<Vec<u8>>,
}

pub trait Transport: Send + Sync {
    fn block_hash(
        &self,
        height: u64,
    ) -> impl Future<Output = Result<Option<H256>, TransportError>> + Send;

    fn block(
        &self,
        hash: H256,
    ) -> impl Future<Output = Result<Option<RawBlock>, TransportError>> + Send;

    /// Raw storage value at `key`, at `at` or the best block when `None`.
    fn storage(
        &self,
        key: &[u8],
        at: Option<H256>,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, TransportError>> + Send;

    fn runtime_version(
        &self,
    ) -> impl Future<Output = Result<RuntimeVersion, TransportError>> + Send;

    /// SCALE encoded `RuntimeMetadataPrefixed` of the latest runtime.
    fn metadata(&self) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;

    /// Submits a length-prefixed extrinsic and returns the hash reported by the node.
    fn submit_extrinsic(
        &self,
        extrinsic: &[u8],
    ) -> impl Future<Output = Result<H256, TransportError>> + Send;

    fn request<R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<R, TransportError>> + Send;

    /// Replaces the underlying connection.
    fn reconnect(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}
