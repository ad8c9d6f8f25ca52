// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Human readable account addresses.

use crate::error::ValidationError;
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

pub trait AddressCodec: Send + Sync {
    /// Parses an address into the 32 byte account id it names.
    fn decode(&self, address: &str) -> Result<[u8; 32], ValidationError>;

    /// Renders an account id for the network identified by `prefix`.
    fn encode(&self, account: &[u8; 32], prefix: u16) -> String;
}

/// SS58 addresses, with 0x-prefixed hex account ids accepted on input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ss58AddressCodec {
    expected_prefix: Option<u16>,
}

impl Ss58AddressCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects SS58 addresses of any other network.
    pub fn with_expected_prefix(prefix: u16) -> Self {
        Self {
            expected_prefix: Some(prefix),
        }
    }
}

fn invalid(address: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidAddress {
        address: address.to_string(),
        reason: reason.into(),
    }
}

impl AddressCodec for Ss58AddressCodec {
    fn decode(&self, address: &str) -> Result<[u8; 32], ValidationError> {
        if let Some(hex_str) = address.strip_prefix("0x") {
            let bytes = hex::decode(hex_str).map_err(|e| invalid(address, e.to_string()))?;
            return <[u8; 32]>::try_from(bytes.as_slice())
                .map_err(|_| invalid(address, format!("expected 32 bytes, got {}", bytes.len())));
        }

        let (account, version) = AccountId32::from_ss58check_with_version(address)
            .map_err(|e| invalid(address, format!("{:?}", e)))?;

        if let Some(expected) = self.expected_prefix
            && version != Ss58AddressFormat::custom(expected)
        {
            return Err(invalid(
                address,
                format!(
                    "uses SS58 prefix {} but expected prefix {}",
                    u16::from(version),
                    expected
                ),
            ));
        }

        Ok(account.into())
    }

    fn encode(&self, account: &[u8; 32], prefix: u16) -> String {
        AccountId32::from(*account).to_ss58check_with_version(Ss58AddressFormat::custom(prefix))
    }
}
