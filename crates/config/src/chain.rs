// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use serde::{Deserialize, Deserializer};

/// Storage layout of `System.Account` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountLayout {
    /// nonce, balances
    #[default]
    Legacy,
    /// nonce, consumers, providers, sufficients, balances
    WithProviders,
}

impl<'de> Deserialize<'de> for AccountLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown account layout '{}', expected 'legacy' or 'providers'",
                s
            ))
        })
    }
}

impl AccountLayout {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "legacy" => Some(AccountLayout::Legacy),
            "providers" | "with-providers" => Some(AccountLayout::WithProviders),
            _ => None,
        }
    }

    /// Layout used by a runtime when no explicit override is configured.
    pub fn for_spec_name(spec_name: &str) -> Self {
        match spec_name.to_lowercase().as_str() {
            "polkadot" | "kusama" => AccountLayout::WithProviders,
            _ => AccountLayout::Legacy,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// SS58 network prefix used when rendering addresses
    ///
    /// Env: SUBSTRATE_CLIENT_CHAIN_SS58_PREFIX
    /// Default: 42
    pub ss58_prefix: u16,

    /// Runtime still uses the pre-indices address encoding
    ///
    /// Env: SUBSTRATE_CLIENT_CHAIN_LEGACY_PALLET_INDICES
    /// Default: false
    pub legacy_pallet_indices: bool,

    /// Upper bound on decoded vector lengths
    ///
    /// Env: SUBSTRATE_CLIENT_CHAIN_MAX_VEC_LEN
    /// Default: 5000
    pub max_vec_len: usize,

    /// Forces the `System.Account` layout instead of deriving it from the spec name
    ///
    /// Env: SUBSTRATE_CLIENT_CHAIN_ACCOUNT_LAYOUT
    /// Valid values: legacy, providers
    /// Default: unset
    pub account_layout: Option<AccountLayout>,

    /// Call used by the transfer helper
    ///
    /// Env: SUBSTRATE_CLIENT_CHAIN_TRANSFER_CALL
    /// Default: Balances.transfer
    pub transfer_call: String,
}

pub(crate) fn default_ss58_prefix() -> u16 {
    42
}

pub(crate) fn default_max_vec_len() -> usize {
    5000
}

pub(crate) fn default_transfer_call() -> String {
    "Balances.transfer".to_string()
}

impl ChainConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_vec_len == 0 {
            return Err(ConfigError::ValidateError(
                "Vector length ceiling must be greater than 0".to_string(),
            ));
        }

        // SS58 prefixes are 14 bits wide.
        if self.ss58_prefix > 16_383 {
            return Err(ConfigError::ValidateError(format!(
                "SS58 prefix {} is out of range",
                self.ss58_prefix
            )));
        }

        match self.transfer_call.split_once('.') {
            Some((pallet, call)) if !pallet.is_empty() && !call.is_empty() => Ok(()),
            _ => Err(ConfigError::ValidateError(format!(
                "Transfer call '{}' must look like 'Pallet.call'",
                self.transfer_call
            ))),
        }
    }

    pub fn account_layout_for(&self, spec_name: &str) -> AccountLayout {
        self.account_layout
            .unwrap_or_else(|| AccountLayout::for_spec_name(spec_name))
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            ss58_prefix: default_ss58_prefix(),
            legacy_pallet_indices: false,
            max_vec_len: default_max_vec_len(),
            account_layout: None,
            transfer_call: default_transfer_call(),
        }
    }
}
