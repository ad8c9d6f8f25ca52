// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod chain;
mod error;
mod log;
mod substrate;

pub use chain::{AccountLayout, ChainConfig};
pub use error::ConfigError;
pub use log::LogConfig;
pub use substrate::SubstrateConfig;

use serde::Deserialize;
use std::path::Path;

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "SUBSTRATE_CLIENT_";

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub substrate: SubstrateConfig,
    pub log: LogConfig,
    pub chain: ChainConfig,
}

/// Flat view of the environment; envy cannot fill nested sections.
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "substrate::default_url")]
    substrate_url: String,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,

    #[serde(default = "chain::default_ss58_prefix")]
    chain_ss58_prefix: u16,
    #[serde(default)]
    chain_legacy_pallet_indices: bool,
    #[serde(default = "chain::default_max_vec_len")]
    chain_max_vec_len: usize,
    #[serde(default)]
    chain_account_layout: Option<AccountLayout>,
    #[serde(default = "chain::default_transfer_call")]
    chain_transfer_call: String,
}

impl From<EnvVars> for ClientConfig {
    fn from(env: EnvVars) -> Self {
        Self {
            substrate: SubstrateConfig {
                url: env.substrate_url,
            },
            log: LogConfig {
                level: env.log_level.to_lowercase(),
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
            },
            chain: ChainConfig {
                ss58_prefix: env.chain_ss58_prefix,
                legacy_pallet_indices: env.chain_legacy_pallet_indices,
                max_vec_len: env.chain_max_vec_len,
                account_layout: env.chain_account_layout,
                transfer_call: env.chain_transfer_call,
            },
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Loads `path` into the process environment (existing variables win), then reads it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenv::from_path(path.as_ref())?;
        Self::from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvVars>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.substrate.validate()?;
        self.log.validate()?;
        self.chain.validate()?;
        Ok(())
    }
}
