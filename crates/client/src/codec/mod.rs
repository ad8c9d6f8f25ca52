// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SCALE decoding and encoding rules for the chain specific types the client
//! has to understand without help from metadata.
//!
//! All behaviour that differs between chains is carried by [`CodecConfig`],
//! which is fixed when the [`Codec`] is built.

mod account;
mod address;
mod balance;
mod events;
mod extrinsic;
mod value;

pub use account::{AccountData, AccountInfo};
pub use address::{Address, MultiAddress};
pub use balance::Balance;
pub use events::{EventRecord, Phase};
pub use extrinsic::{Call, CallIndex, ExtrinsicEnvelope, MultiSignature, SignatureBlock};
pub use value::{Value, ValueExt, decode_value};

pub(crate) use extrinsic::decode_single_compact;

use crate::error::DecodeError;
use config::{AccountLayout, ChainConfig};
use parity_scale_codec::{Compact, Decode};

pub const DEFAULT_MAX_VEC_LEN: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// When set, the legacy `Address` type never treats 0xFF as an account id marker.
    pub legacy_pallet_indices: bool,
    pub max_vec_len: usize,
    pub account_layout: AccountLayout,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            legacy_pallet_indices: false,
            max_vec_len: DEFAULT_MAX_VEC_LEN,
            account_layout: AccountLayout::Legacy,
        }
    }
}

impl CodecConfig {
    /// Resolves the configuration for a runtime identified by `spec_name`.
    pub fn for_chain(chain: &ChainConfig, spec_name: &str) -> Self {
        Self {
            legacy_pallet_indices: chain.legacy_pallet_indices,
            max_vec_len: chain.max_vec_len,
            account_layout: chain.account_layout_for(spec_name),
        }
    }
}

/// Fixed-shape structs that may appear as elements of a bounded vector.
///
/// Tagged unions are deliberately left out: their size depends on the
/// discriminant, so they go through their own decoders.
pub trait PlainRecord: Decode {}

impl PlainRecord for [u8; 32] {}
impl PlainRecord for u32 {}
impl PlainRecord for u64 {}

#[derive(Debug, Clone)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Reads a compact element count and rejects it if it exceeds the ceiling.
    pub fn decode_len(&self, input: &mut &[u8]) -> Result<usize, DecodeError> {
        let len = Compact::<u64>::decode(input)?.0;
        if len > self.config.max_vec_len as u64 {
            return Err(DecodeError::LengthTooLarge {
                len,
                max: self.config.max_vec_len,
            });
        }
        Ok(len as usize)
    }

    pub fn decode_vec<T: PlainRecord>(&self, input: &mut &[u8]) -> Result<Vec<T>, DecodeError> {
        let len = self.decode_len(input)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

/// Fails unless `input` has been fully consumed.
pub(crate) fn ensure_consumed(input: &[u8]) -> Result<(), DecodeError> {
    if input.is_empty() {
        Ok(())
    } else {
        Err(DecodeError::TrailingBytes(input.len()))
    }
}

pub(crate) fn read_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], DecodeError> {
    Ok(<[u8; N]>::decode(input)?)
}
