// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod hash;

pub use hash::{HashError, parse_block_number_from_json, parse_hash};
