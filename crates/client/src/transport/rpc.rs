// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{RawBlock, RuntimeVersion, Transport};
use crate::error::TransportError;
use crate::utils::hash::{decode_hex, extract_hash, parse_block_number_from_json, to_hex};
use crate::utils::parse_hash;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sp_core::H256;
use subxt_rpcs::RpcClient;
use subxt_rpcs::client::RpcParams;

/// Error texts that mean the socket is gone rather than the call failed.
const STALE_MARKERS: [&str; 3] = ["closed", "disconnected", "restart"];

/// [`Transport`] over the legacy `chain_*`, `state_*` and `author_*` RPC methods.
#[derive(Clone)]
pub struct RpcTransport {
    client: RpcClient,
    url: Option<String>,
}

impl RpcTransport {
    /// Connects to `url`. Plain `ws://` and `http://` endpoints are allowed.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let client = open(url).await?;
        tracing::info!(url = %url, "Connected to node");
        Ok(Self {
            client,
            url: Some(url.to_string()),
        })
    }

    /// Wraps an existing client. Such a transport cannot reconnect.
    pub fn from_client(client: RpcClient) -> Self {
        Self { client, url: None }
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let mut rpc_params = RpcParams::new();
        for param in params {
            rpc_params
                .push(param)
                .map_err(|e| TransportError::invalid_response(method, e))?;
        }

        tracing::trace!(method = %method, "RPC request");
        self.client
            .request::<Value>(method, rpc_params)
            .await
            .map_err(|e| classify(method, e))
    }
}

async fn open(url: &str) -> Result<RpcClient, TransportError> {
    let insecure = url.starts_with("ws://") || url.starts_with("http://");
    let result = if insecure {
        RpcClient::from_insecure_url(url).await
    } else {
        RpcClient::from_url(url).await
    };
    result.map_err(|e| TransportError::Connect {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn classify(method: &str, err: impl std::fmt::Display) -> TransportError {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if STALE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        TransportError::StaleConnection(message)
    } else {
        TransportError::Rpc {
            method: method.to_string(),
            message,
        }
    }
}

fn deserialize<R: DeserializeOwned>(method: &str, value: Value) -> Result<R, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::invalid_response(method, e))
}

fn hex_string(method: &str, value: &Value) -> Result<Vec<u8>, TransportError> {
    let text = value
        .as_str()
        .ok_or_else(|| TransportError::invalid_response(method, "expected hex string"))?;
    decode_hex(text).map_err(|e| TransportError::invalid_response(method, e))
}

/// Parses a `chain_getBlock` response.
fn parse_block(hash: H256, value: &Value) -> Result<RawBlock, TransportError> {
    const METHOD: &str = "chain_getBlock";
    let block = value
        .get("block")
        .ok_or_else(|| TransportError::invalid_response(METHOD, "missing 'block'"))?;
    let header = block
        .get("header")
        .ok_or_else(|| TransportError::invalid_response(METHOD, "missing 'block.header'"))?;

    let parent_hash =
        extract_hash(header, "parentHash").map_err(|e| TransportError::invalid_response(METHOD, e))?;
    let number = header
        .get("number")
        .ok_or_else(|| TransportError::invalid_response(METHOD, "missing 'number'"))
        .and_then(|n| {
            parse_block_number_from_json(n).map_err(|e| TransportError::invalid_response(METHOD, e))
        })?;

    let extrinsics = block
        .get("extrinsics")
        .and_then(|e| e.as_array())
        .ok_or_else(|| TransportError::invalid_response(METHOD, "missing 'block.extrinsics'"))?
        .iter()
        .map(|ext| hex_string(METHOD, ext))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawBlock {
        number,
        hash,
        parent_hash,
        extrinsics,
    })
}

impl Transport for RpcTransport {
    async fn block_hash(&self, height: u64) -> Result<Option<H256>, TransportError> {
        const METHOD: &str = "chain_getBlockHash";
        let value = self.call(METHOD, vec![Value::from(height)]).await?;
        match value.as_str() {
            Some(text) => parse_hash(text)
                .map(Some)
                .map_err(|e| TransportError::invalid_response(METHOD, e)),
            None if value.is_null() => Ok(None),
            None => Err(TransportError::invalid_response(METHOD, "expected hash or null")),
        }
    }

    async fn block(&self, hash: H256) -> Result<Option<RawBlock>, TransportError> {
        let value = self
            .call("chain_getBlock", vec![Value::from(to_hex(hash.as_bytes()))])
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        parse_block(hash, &value).map(Some)
    }

    async fn storage(
        &self,
        key: &[u8],
        at: Option<H256>,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        const METHOD: &str = "state_getStorage";
        let mut params = vec![Value::from(to_hex(key))];
        if let Some(at) = at {
            params.push(Value::from(to_hex(at.as_bytes())));
        }
        let value = self.call(METHOD, params).await?;
        if value.is_null() {
            return Ok(None);
        }
        hex_string(METHOD, &value).map(Some)
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion, TransportError> {
        const METHOD: &str = "state_getRuntimeVersion";
        let value = self.call(METHOD, Vec::new()).await?;
        deserialize(METHOD, value)
    }

    async fn metadata(&self) -> Result<Vec<u8>, TransportError> {
        const METHOD: &str = "state_getMetadata";
        let value = self.call(METHOD, Vec::new()).await?;
        hex_string(METHOD, &value)
    }

    async fn submit_extrinsic(&self, extrinsic: &[u8]) -> Result<H256, TransportError> {
        const METHOD: &str = "author_submitExtrinsic";
        let value = self
            .call(METHOD, vec![Value::from(to_hex(extrinsic))])
            .await?;
        let text = value
            .as_str()
            .ok_or_else(|| TransportError::invalid_response(METHOD, "expected hash"))?;
        parse_hash(text).map_err(|e| TransportError::invalid_response(METHOD, e))
    }

    async fn request<R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, TransportError> {
        let value = self.call(method, params).await?;
        deserialize(method, value)
    }

    async fn reconnect(&mut self) -> Result<(), TransportError> {
        let Some(url) = self.url.clone() else {
            return Err(TransportError::Connect {
                url: "<in-process client>".to_string(),
                message: "transport was built without a url".to_string(),
            });
        };
        self.client = open(&url).await?;
        tracing::info!(url = %url, "Reconnected to node");
        Ok(())
    }
}
