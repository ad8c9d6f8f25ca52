// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fee lookup through `payment_queryInfo`.

use crate::error::TransportError;
use crate::transport::Transport;
use crate::utils::hash::to_hex;
use serde::Deserialize;
use serde_json::Value;
use sp_core::H256;

const QUERY_INFO: &str = "payment_queryInfo";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeDispatchInfo {
    partial_fee: PartialFee,
}

/// Nodes report `partialFee` either as a string or as a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PartialFee {
    Text(String),
    Number(u128),
}

impl PartialFee {
    fn to_decimal(&self) -> Result<String, TransportError> {
        let value = match self {
            PartialFee::Number(n) => *n,
            PartialFee::Text(text) => match text.strip_prefix("0x") {
                Some(hex_digits) => u128::from_str_radix(hex_digits, 16),
                None => text.parse::<u128>(),
            }
            .map_err(|e| {
                TransportError::invalid_response(QUERY_INFO, format!("partialFee '{}': {}", text, e))
            })?,
        };
        Ok(value.to_string())
    }
}

/// Queries the partial fee of `extrinsic` with state as of `parent_hash`.
pub async fn query_partial_fee<T: Transport>(
    transport: &T,
    extrinsic: &[u8],
    parent_hash: H256,
) -> Result<String, TransportError> {
    let params = vec![
        Value::from(to_hex(extrinsic)),
        Value::from(to_hex(parent_hash.as_bytes())),
    ];
    let info: RuntimeDispatchInfo = transport.request(QUERY_INFO, params).await?;
    info.partial_fee.to_decimal()
}
