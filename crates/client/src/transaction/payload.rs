// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::codec::{Call, ExtrinsicEnvelope, MultiAddress, MultiSignature, SignatureBlock};
use crate::error::{ClientError, ResultExt, ValidationError};
use crate::sr25519::Keypair;
use parity_scale_codec::{Compact, Encode};
use sp_core::H256;
use sp_crypto_hashing::blake2_256;
use sp_runtime::generic::Era;

/// Payloads longer than this are hashed before signing.
pub const MAX_UNHASHED_PAYLOAD: usize = 256;

/// Validity window of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mortality {
    #[default]
    Immortal,
    /// Valid for `period` blocks from `block_number`, whose hash is `block_hash`.
    Mortal {
        period: u64,
        block_number: u64,
        block_hash: H256,
    },
}

impl Mortality {
    /// The era to encode and the block hash it is checked against.
    pub fn resolve(&self, genesis_hash: H256) -> Result<(Era, H256), ValidationError> {
        match *self {
            Mortality::Immortal => Ok((Era::Immortal, genesis_hash)),
            Mortality::Mortal {
                period,
                block_number,
                block_hash,
            } => {
                let era = Era::mortal(period, block_number);
                let birth = era.birth(block_number);
                if birth != block_number {
                    return Err(ValidationError::InvalidMortality(format!(
                        "era with period {} starting at block {} is born at block {}",
                        period, block_number, birth
                    )));
                }
                Ok((era, block_hash))
            }
        }
    }
}

/// Per-transaction options. A `None` nonce is read from chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxOptions {
    pub nonce: Option<u64>,
    pub tip: u128,
    pub mortality: Mortality,
}

/// Runtime facts every signature commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
    pub spec_version: u32,
    pub transaction_version: u32,
    pub genesis_hash: H256,
}

/// The bytes a v4 signature covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningPayload(Vec<u8>);

impl SigningPayload {
    pub fn new(
        call: &Call,
        era: &Era,
        nonce: u64,
        tip: u128,
        chain: &ChainContext,
        checkpoint: H256,
    ) -> Self {
        let mut out = call.encode();
        era.encode_to(&mut out);
        Compact(nonce).encode_to(&mut out);
        Compact(tip).encode_to(&mut out);
        chain.spec_version.encode_to(&mut out);
        chain.transaction_version.encode_to(&mut out);
        out.extend_from_slice(chain.genesis_hash.as_bytes());
        out.extend_from_slice(checkpoint.as_bytes());
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// What actually gets signed: the payload, or its blake2-256 if too long.
    pub fn message(&self) -> Vec<u8> {
        if self.0.len() > MAX_UNHASHED_PAYLOAD {
            blake2_256(&self.0).to_vec()
        } else {
            self.0.clone()
        }
    }
}

/// Signs `call` and assembles the signed extrinsic.
pub fn sign_call(
    keys: &Keypair,
    call: Call,
    chain: &ChainContext,
    nonce: u64,
    options: &TxOptions,
) -> Result<ExtrinsicEnvelope, ClientError> {
    let (era, checkpoint) = options
        .mortality
        .resolve(chain.genesis_hash)
        .context("sign transaction")?;
    let payload = SigningPayload::new(&call, &era, nonce, options.tip, chain, checkpoint);
    let signature = keys.sign(&payload.message()).context("sign transaction")?;

    let block = SignatureBlock {
        signer: MultiAddress::AccountId32(keys.public()),
        signature: MultiSignature::Sr25519(signature),
        era,
        nonce,
        tip: options.tip,
    };
    Ok(ExtrinsicEnvelope::signed(block, call))
}
