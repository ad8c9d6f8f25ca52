// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct SubstrateConfig {
    /// Substrate node WebSocket or HTTP URL
    ///
    /// Env: SUBSTRATE_CLIENT_SUBSTRATE_URL
    /// Valid schemes: ws://, wss://, http://, https://
    /// Default: ws://127.0.0.1:9944
    pub url: String,
}

pub(crate) fn default_url() -> String {
    "ws://127.0.0.1:9944".to_string()
}

impl SubstrateConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidateError(
                "Substrate URL cannot be empty".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| ConfigError::ValidateError(format!("Invalid URL '{}': {}", self.url, e)))?;

        match parsed.scheme() {
            "ws" | "wss" | "http" | "https" => Ok(()),
            scheme => Err(ConfigError::ValidateError(format!(
                "Invalid URL scheme '{}'. Must be ws://, wss://, http://, or https://",
                scheme
            ))),
        }
    }

    /// Plain-text schemes need the insecure RPC client constructor.
    pub fn is_insecure(&self) -> bool {
        self.url.starts_with("ws://") || self.url.starts_with("http://")
    }
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
