// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Building, signing and submitting extrinsics.

mod call;
mod payload;

pub use call::{CallArg, CallBuilder};
pub use payload::{
    ChainContext, MAX_UNHASHED_PAYLOAD, Mortality, SigningPayload, TxOptions, sign_call,
};

use crate::codec::ExtrinsicEnvelope;
use crate::error::{ClientError, ResultExt};
use crate::transport::Transport;
use crate::utils::hash::extrinsic_hash;
use sp_core::H256;

/// Submits a signed extrinsic once. Failures are returned, never retried.
pub async fn submit<T: Transport>(
    transport: &T,
    extrinsic: &ExtrinsicEnvelope,
) -> Result<H256, ClientError> {
    let encoded = extrinsic.encode();
    let txid = extrinsic_hash(&encoded);

    match transport.submit_extrinsic(&encoded).await {
        Ok(hash) => {
            tracing::info!(txid = %txid, len = encoded.len(), "Submitted extrinsic");
            Ok(hash)
        }
        Err(err) => {
            tracing::warn!(txid = %txid, error = %err, "Extrinsic submission failed");
            Err(err).context("submit extrinsic")
        }
    }
}
