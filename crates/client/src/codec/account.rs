// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Codec, PlainRecord};
use crate::error::DecodeError;
use config::AccountLayout;
use parity_scale_codec::{Decode, Encode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, Serialize)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub misc_frozen: u128,
    pub free_frozen: u128,
}

impl PlainRecord for AccountData {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
struct LegacyAccountInfo {
    nonce: u32,
    data: AccountData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
struct ProvidersAccountInfo {
    nonce: u32,
    consumers: u32,
    providers: u32,
    sufficients: u32,
    data: AccountData,
}

/// `System.Account` value normalised over both storage layouts.
///
/// The legacy layout carries no reference counters, so they read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}

impl Codec {
    pub fn decode_account_info(&self, bytes: &[u8]) -> Result<AccountInfo, DecodeError> {
        let mut input = bytes;
        let info = match self.config.account_layout {
            AccountLayout::Legacy => {
                let legacy = LegacyAccountInfo::decode(&mut input)?;
                AccountInfo {
                    nonce: legacy.nonce,
                    consumers: 0,
                    providers: 0,
                    sufficients: 0,
                    data: legacy.data,
                }
            }
            AccountLayout::WithProviders => {
                let current = ProvidersAccountInfo::decode(&mut input)?;
                AccountInfo {
                    nonce: current.nonce,
                    consumers: current.consumers,
                    providers: current.providers,
                    sufficients: current.sufficients,
                    data: current.data,
                }
            }
        };
        // Newer runtimes append a flags word to the balance data.
        if !input.is_empty() {
            tracing::debug!(
                trailing = input.len(),
                "Ignoring trailing bytes after account info"
            );
        }
        Ok(info)
    }
}
