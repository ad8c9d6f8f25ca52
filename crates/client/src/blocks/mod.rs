// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns a block and its `System.Events` storage into transfer records.
//!
//! Every `Balances.Transfer` event emitted while applying an extrinsic is
//! paired with that extrinsic. Any fault aborts the whole block.

mod fees;
mod types;

pub use fees::query_partial_fee;
pub use types::{BlockResponse, ExtrinsicRecord, TransactionKind, TransactionStatus};

use crate::address::AddressCodec;
use crate::codec::{
    Codec, EventRecord, ExtrinsicEnvelope, Phase, ValueExt, decode_single_compact,
};
use crate::error::{ClientError, DecodeError, LookupError, ResultExt};
use crate::metadata::RuntimeMetadata;
use crate::transport::{RawBlock, Transport};
use crate::utils::hash::{extrinsic_hash, to_hex};

const TIMESTAMP_SET: &str = "Timestamp.set";

/// Response for a block that carries no extrinsics.
pub fn empty_block(block: &RawBlock) -> BlockResponse {
    BlockResponse {
        height: block.number,
        parent_hash: to_hex(block.parent_hash.as_bytes()),
        block_hash: to_hex(block.hash.as_bytes()),
        timestamp: 0,
        extrinsic: Vec::new(),
    }
}

/// A transfer matched to its extrinsic, still missing the fee.
#[derive(Debug)]
struct MatchedTransfer<'b> {
    raw: &'b [u8],
    record: ExtrinsicRecord,
}

pub struct Reconstructor<'a> {
    codec: &'a Codec,
    metadata: &'a RuntimeMetadata,
    addresses: &'a dyn AddressCodec,
    ss58_prefix: u16,
}

impl<'a> Reconstructor<'a> {
    pub fn new(
        codec: &'a Codec,
        metadata: &'a RuntimeMetadata,
        addresses: &'a dyn AddressCodec,
        ss58_prefix: u16,
    ) -> Self {
        Self {
            codec,
            metadata,
            addresses,
            ss58_prefix,
        }
    }

    /// Builds the response for `block`. `events` is the raw `System.Events`
    /// value at the block, `None` when the storage entry is absent.
    pub async fn reconstruct<T: Transport>(
        &self,
        transport: &T,
        block: &RawBlock,
        events: Option<&[u8]>,
    ) -> Result<BlockResponse, ClientError> {
        if block.extrinsics.is_empty() {
            return Ok(empty_block(block));
        }

        let envelopes = block
            .extrinsics
            .iter()
            .map(|raw| ExtrinsicEnvelope::decode(raw))
            .collect::<Result<Vec<_>, _>>()
            .context("decode extrinsics")?;

        let timestamp = self.timestamp(&envelopes)?;

        let events = match events {
            Some(bytes) => self
                .codec
                .decode_events(self.metadata, bytes)
                .context("decode events")?,
            None => Vec::new(),
        };
        check_phases(&events, envelopes.len()).context("match events")?;

        let matched = self.match_transfers(block, &envelopes, &events)?;

        let mut records = Vec::with_capacity(matched.len());
        for MatchedTransfer { raw, mut record } in matched {
            record.fee = query_partial_fee(transport, raw, block.parent_hash)
                .await
                .context("query fee")?;
            records.push(record);
        }

        tracing::debug!(
            height = block.number,
            extrinsics = envelopes.len(),
            events = events.len(),
            transfers = records.len(),
            "Reconstructed block"
        );

        Ok(BlockResponse {
            height: block.number,
            parent_hash: to_hex(block.parent_hash.as_bytes()),
            block_hash: to_hex(block.hash.as_bytes()),
            timestamp,
            extrinsic: records,
        })
    }

    /// Unix seconds from the block's single `Timestamp.set` inherent.
    fn timestamp(&self, envelopes: &[ExtrinsicEnvelope]) -> Result<u64, ClientError> {
        let index = self
            .metadata
            .find_call(TIMESTAMP_SET)
            .map_err(|_| LookupError::MissingEntry(TIMESTAMP_SET.to_string()))
            .context("read timestamp")?
            .index;

        let mut calls = envelopes
            .iter()
            .filter(|e| !e.is_signed() && e.call.index == index);

        let first = calls
            .next()
            .ok_or(LookupError::MissingTimestamp)
            .context("read timestamp")?;
        let extra = calls.count();
        if extra > 0 {
            return Err(DecodeError::MultipleTimestamps(extra + 1)).context("read timestamp");
        }

        let millis = decode_single_compact(&first.call.args).context("read timestamp")?;
        Ok(millis / 1000)
    }

    fn match_transfers<'b>(
        &self,
        block: &'b RawBlock,
        envelopes: &[ExtrinsicEnvelope],
        events: &[EventRecord],
    ) -> Result<Vec<MatchedTransfer<'b>>, ClientError> {
        let mut transfers: Vec<(u32, &EventRecord)> = Vec::new();
        for (position, event) in events.iter().enumerate() {
            if !event.is("Balances", "Transfer") {
                continue;
            }
            match event.phase {
                Phase::ApplyExtrinsic(phase) => transfers.push((phase, event)),
                other => tracing::debug!(
                    phase = ?other,
                    position,
                    "Skipping transfer not caused by an extrinsic"
                ),
            }
        }
        transfers.sort_by_key(|(phase, _)| *phase);

        transfers
            .into_iter()
            .map(|(phase, event)| {
                let idx = phase as usize;
                let envelope = &envelopes[idx];
                let signature = envelope
                    .signature
                    .as_ref()
                    .ok_or(LookupError::UnsignedTransfer(phase))
                    .context("match events")?;
                let (from, to, amount) = transfer_fields(event).context("decode events")?;

                let raw = block.extrinsics[idx].as_slice();
                let record = ExtrinsicRecord {
                    kind: TransactionKind::Transfer,
                    status: TransactionStatus::Success,
                    txid: extrinsic_hash(raw),
                    from_address: self.addresses.encode(&from, self.ss58_prefix),
                    to_address: self.addresses.encode(&to, self.ss58_prefix),
                    amount: amount.to_string(),
                    fee: String::new(),
                    signature: signature.signature.to_hex(),
                    nonce: signature.nonce,
                    era: signature.era_hex(),
                    extrinsic_index: phase,
                    event_index: phase as usize,
                    extrinsic_length: envelope.encoded_len(),
                };
                Ok(MatchedTransfer { raw, record })
            })
            .collect()
    }
}

/// Every `ApplyExtrinsic` phase must name an extrinsic of this block.
fn check_phases(events: &[EventRecord], extrinsics: usize) -> Result<(), LookupError> {
    for event in events {
        if let Phase::ApplyExtrinsic(phase) = event.phase
            && phase as usize >= extrinsics
        {
            return Err(LookupError::PhaseOutOfRange { phase, extrinsics });
        }
    }
    Ok(())
}

fn transfer_fields(event: &EventRecord) -> Result<([u8; 32], [u8; 32], u128), DecodeError> {
    let malformed = |what: &str| DecodeError::Malformed(format!("Balances.Transfer {}", what));
    let from = event
        .field(0)
        .and_then(|v| v.as_account_id())
        .ok_or_else(|| malformed("sender"))?;
    let to = event
        .field(1)
        .and_then(|v| v.as_account_id())
        .ok_or_else(|| malformed("recipient"))?;
    let amount = event
        .field(2)
        .and_then(|v| v.as_amount())
        .ok_or_else(|| malformed("amount"))?;
    Ok((from, to, amount))
}
