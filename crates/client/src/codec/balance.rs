// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use parity_scale_codec::{Decode, Encode, Error, Input, Output};
use std::fmt;

/// A 16 byte little-endian amount.
///
/// Some chains write sixteen 0xFF bytes where they mean "nothing", so that
/// pattern decodes to zero. As a consequence `u128::MAX` cannot round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Balance(pub u128);

const SENTINEL: [u8; 16] = [0xFF; 16];

impl Balance {
    /// Applies the sentinel rule to an already decoded 16 byte value.
    pub fn from_raw(value: u128) -> Self {
        if value.to_le_bytes() == SENTINEL {
            return Balance(0);
        }
        Balance(value)
    }
}

impl Decode for Balance {
    fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
        let mut buf = [0u8; 16];
        input.read(&mut buf)?;
        Ok(Balance::from_raw(u128::from_le_bytes(buf)))
    }
}

impl Encode for Balance {
    fn size_hint(&self) -> usize {
        16
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&self.0.to_le_bytes());
    }
}

impl From<u128> for Balance {
    fn from(value: u128) -> Self {
        Balance(value)
    }
}

impl From<Balance> for u128 {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
