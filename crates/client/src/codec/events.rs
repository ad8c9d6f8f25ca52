// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Codec, Value, ensure_consumed};
use crate::error::DecodeError;
use crate::metadata::RuntimeMetadata;
use parity_scale_codec::Decode;

/// Point in block execution at which an event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ApplyExtrinsic(u32),
    Finalization,
    Initialization,
}

impl Phase {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        match u8::decode(input)? {
            0 => Ok(Phase::ApplyExtrinsic(u32::decode(input)?)),
            1 => Ok(Phase::Finalization),
            2 => Ok(Phase::Initialization),
            value => Err(DecodeError::UnknownDiscriminant {
                what: "Phase",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub phase: Phase,
    pub pallet: String,
    pub name: String,
    pub pallet_index: u8,
    pub event_index: u8,
    pub fields: Vec<(Option<String>, Value)>,
    pub topics: Vec<[u8; 32]>,
}

impl EventRecord {
    pub fn is(&self, pallet: &str, name: &str) -> bool {
        self.pallet == pallet && self.name == name
    }

    /// Field at `position`, in declaration order.
    pub fn field(&self, position: usize) -> Option<&Value> {
        self.fields.get(position).map(|(_, value)| value)
    }
}

impl Codec {
    /// Decodes the `System.Events` storage value.
    pub fn decode_events(
        &self,
        metadata: &RuntimeMetadata,
        bytes: &[u8],
    ) -> Result<Vec<EventRecord>, DecodeError> {
        let mut input = bytes;
        let count = self.decode_len(&mut input)?;
        let mut events = Vec::with_capacity(count);

        for _ in 0..count {
            let phase = Phase::decode(&mut input)?;
            let pallet_index = u8::decode(&mut input)?;
            let event_index = u8::decode(&mut input)?;
            let entry = metadata.event(pallet_index, event_index).ok_or(
                DecodeError::UnknownEvent {
                    pallet: pallet_index,
                    event: event_index,
                },
            )?;
            let fields = self.decode_fields(metadata.types(), &entry.fields, &mut input)?;
            let topics = self.decode_vec::<[u8; 32]>(&mut input)?;

            events.push(EventRecord {
                phase,
                pallet: entry.pallet.clone(),
                name: entry.name.clone(),
                pallet_index,
                event_index,
                fields,
                topics,
            });
        }

        ensure_consumed(input)?;
        tracing::trace!(count = events.len(), "Decoded block events");
        Ok(events)
    }
}
