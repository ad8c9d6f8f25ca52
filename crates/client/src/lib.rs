// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for Substrate based chains.
//!
//! Reads blocks back as transfer records and builds, signs and submits
//! sr25519 extrinsics. Runtime metadata is cached per spec version and
//! refreshed through [`Client::ensure_fresh`] before any metadata dependent
//! operation.

pub mod address;
pub mod blocks;
pub mod client;
pub mod codec;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod sr25519;
pub mod transaction;
pub mod transport;
pub mod utils;

pub use address::{AddressCodec, Ss58AddressCodec};
pub use blocks::{BlockResponse, ExtrinsicRecord};
pub use client::Client;
pub use config;
pub use error::{ClientError, ErrorKind};
pub use sr25519::Keypair;
pub use transaction::{CallArg, Mortality, TxOptions};
pub use transport::{RpcTransport, Transport};

#[cfg(test)]
pub mod test_fixtures;
