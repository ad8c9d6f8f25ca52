// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test fixtures: an in-memory [`Transport`], a V14 metadata blob and
//! helpers that encode blocks and events the way a node would return them.

use crate::codec::{Call, CallIndex, ExtrinsicEnvelope, MultiAddress, MultiSignature, SignatureBlock};
use crate::error::{DecodeError, TransportError};
use crate::metadata::{FrameMetadataDecoder, MetadataDecoder, RuntimeMetadata};
use crate::transport::{RawBlock, RuntimeVersion, Transport};
use parity_scale_codec::{Compact, Encode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sp_core::H256;
use sp_runtime::generic::Era;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// `//Alice` sr25519 public key.
pub const ALICE: [u8; 32] = [
    0xd4, 0x35, 0x93, 0xc7, 0x15, 0xfd, 0xd3, 0x1c, 0x61, 0x14, 0x1a, 0xbd, 0x04, 0xa9, 0x9f, 0xd6,
    0x82, 0x2c, 0x85, 0x58, 0x85, 0x4c, 0xcd, 0xe3, 0x9a, 0x56, 0x84, 0xe7, 0xa5, 0x6d, 0xa2, 0x7d,
];

/// `//Bob` sr25519 public key.
pub const BOB: [u8; 32] = [
    0x8e, 0xaf, 0x04, 0x15, 0x16, 0x87, 0x73, 0x63, 0x26, 0xc9, 0xfe, 0xa1, 0x7e, 0x25, 0xfc, 0x52,
    0x87, 0x61, 0x36, 0x93, 0xc9, 0x12, 0x90, 0x9c, 0xb2, 0x26, 0xaa, 0x47, 0x94, 0xf2, 0x6a, 0x48,
];

pub const TIMESTAMP_PALLET: u8 = 3;
pub const BALANCES_PALLET: u8 = 5;
pub const TRANSFER_EVENT: u8 = 2;

pub fn runtime_version(spec_version: u32) -> RuntimeVersion {
    RuntimeVersion {
        spec_name: "substrate".to_string(),
        spec_version,
        transaction_version: 1,
    }
}

/// Metadata with the entries the reconstructor and call builder touch,
/// decoded from [`frame_metadata_bytes`].
///
/// `Balances.transfer` takes a `MultiAddress` enum laid out like the real
/// runtime type, so variant lookup by name is exercised.
pub fn sample_metadata() -> RuntimeMetadata {
    FrameMetadataDecoder
        .decode(&frame_metadata_bytes())
        .expect("fixture metadata decodes")
}

/// Length-prefixed signed `Balances.transfer` from `from` to `to`.
///
/// The signature bytes are a fixed pattern; nothing on the read path verifies them.
pub fn signed_transfer(from: [u8; 32], to: [u8; 32], amount: u128, nonce: u64) -> Vec<u8> {
    let mut args = MultiAddress::AccountId32(to).encode();
    Compact(amount).encode_to(&mut args);

    ExtrinsicEnvelope::signed(
        SignatureBlock {
            signer: MultiAddress::AccountId32(from),
            signature: MultiSignature::Sr25519([0x5a; 64]),
            era: Era::Immortal,
            nonce,
            tip: 0,
        },
        Call {
            index: CallIndex::new(BALANCES_PALLET, 0),
            args,
        },
    )
    .encode()
}

/// Length-prefixed `Timestamp.set(millis)` inherent.
pub fn timestamp_ext(millis: u64) -> Vec<u8> {
    ExtrinsicEnvelope::unsigned(Call {
        index: CallIndex::new(TIMESTAMP_PALLET, 0),
        args: Compact(millis).encode(),
    })
    .encode()
}

/// One `Balances.Transfer` event record emitted during extrinsic `phase`.
pub fn transfer_event(phase: u32, from: [u8; 32], to: [u8; 32], amount: u128) -> Vec<u8> {
    let mut out = vec![0u8];
    phase.encode_to(&mut out);
    out.push(BALANCES_PALLET);
    out.push(TRANSFER_EVENT);
    out.extend_from_slice(&from);
    out.extend_from_slice(&to);
    amount.encode_to(&mut out);
    Vec::<[u8; 32]>::new().encode_to(&mut out);
    out
}

/// `System.ExtrinsicSuccess` emitted during extrinsic `phase`.
pub fn extrinsic_success_event(phase: u32) -> Vec<u8> {
    let mut out = vec![0u8];
    phase.encode_to(&mut out);
    out.extend_from_slice(&[0, 0]);
    Vec::<[u8; 32]>::new().encode_to(&mut out);
    out
}

/// `System.Events` storage value holding `records`.
pub fn encode_events(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Compact(records.len() as u32).encode();
    for record in records {
        out.extend_from_slice(record);
    }
    out
}

/// Decoder that hands out a fixed table regardless of input.
pub struct StaticDecoder {
    metadata: Option<RuntimeMetadata>,
}

impl StaticDecoder {
    pub fn failing() -> Self {
        Self { metadata: None }
    }
}

impl Default for StaticDecoder {
    fn default() -> Self {
        Self {
            metadata: Some(sample_metadata()),
        }
    }
}

impl MetadataDecoder for StaticDecoder {
    fn decode(&self, _raw: &[u8]) -> Result<RuntimeMetadata, DecodeError> {
        self.metadata
            .clone()
            .ok_or_else(|| DecodeError::InvalidMetadata("decoder configured to fail".to_string()))
    }
}

#[derive(Default)]
struct MockState {
    runtime_version: Option<RuntimeVersion>,
    runtime_version_failures: VecDeque<TransportError>,
    submit_failures: VecDeque<TransportError>,
    hashes: HashMap<u64, H256>,
    blocks: HashMap<H256, RawBlock>,
    storage: HashMap<(Vec<u8>, Option<H256>), Vec<u8>>,
    fee_response: Option<Value>,
    fee_params: Vec<Vec<Value>>,
    submitted: Vec<Vec<u8>>,
    calls: HashMap<&'static str, usize>,
}

/// In-memory node. Every trait method is counted under its own name.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash returned for every accepted submission.
    pub fn submit_hash() -> H256 {
        H256::repeat_byte(0xab)
    }

    fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn record(&self, method: &'static str) {
        self.with(|s| *s.calls.entry(method).or_default() += 1);
    }

    pub fn set_runtime_version(&self, version: RuntimeVersion) {
        self.with(|s| s.runtime_version = Some(version));
    }

    /// Queues a failure for the next `runtime_version` call.
    pub fn fail_next_runtime_version(&self, err: TransportError) {
        self.with(|s| s.runtime_version_failures.push_back(err));
    }

    pub fn fail_next_submit(&self, err: TransportError) {
        self.with(|s| s.submit_failures.push_back(err));
    }

    /// Stores a block and makes it reachable by `number`.
    pub fn insert_block(&self, hash: H256, number: u64, extrinsics: Vec<Vec<u8>>) {
        let block = RawBlock {
            number,
            hash,
            parent_hash: H256::from_low_u64_be(number.saturating_sub(1)),
            extrinsics,
        };
        self.with(|s| {
            s.hashes.insert(number, hash);
            s.blocks.insert(hash, block);
        });
    }

    pub fn insert_storage(&self, key: Vec<u8>, at: Option<H256>, value: Vec<u8>) {
        self.with(|s| s.storage.insert((key, at), value));
    }

    /// Result of every `payment_queryInfo` request. Unset means the request fails.
    pub fn set_fee_response(&self, response: Value) {
        self.with(|s| s.fee_response = Some(response));
    }

    pub fn fee_params(&self) -> Vec<Vec<Value>> {
        self.with(|s| s.fee_params.clone())
    }

    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.with(|s| s.submitted.clone())
    }

    pub fn calls(&self, method: &str) -> usize {
        self.with(|s| s.calls.get(method).copied().unwrap_or(0))
    }

    pub fn total_calls(&self) -> usize {
        self.with(|s| s.calls.values().sum())
    }
}

impl Transport for MockTransport {
    async fn block_hash(&self, height: u64) -> Result<Option<H256>, TransportError> {
        self.record("block_hash");
        Ok(self.with(|s| s.hashes.get(&height).copied()))
    }

    async fn block(&self, hash: H256) -> Result<Option<RawBlock>, TransportError> {
        self.record("block");
        Ok(self.with(|s| s.blocks.get(&hash).cloned()))
    }

    async fn storage(
        &self,
        key: &[u8],
        at: Option<H256>,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        self.record("storage");
        Ok(self.with(|s| s.storage.get(&(key.to_vec(), at)).cloned()))
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion, TransportError> {
        self.record("runtime_version");
        self.with(|s| {
            if let Some(err) = s.runtime_version_failures.pop_front() {
                return Err(err);
            }
            s.runtime_version.clone().ok_or_else(|| TransportError::Rpc {
                method: "state_getRuntimeVersion".to_string(),
                message: "no runtime version configured".to_string(),
            })
        })
    }

    async fn metadata(&self) -> Result<Vec<u8>, TransportError> {
        self.record("metadata");
        Ok(Vec::new())
    }

    async fn submit_extrinsic(&self, extrinsic: &[u8]) -> Result<H256, TransportError> {
        self.record("submit_extrinsic");
        self.with(|s| {
            if let Some(err) = s.submit_failures.pop_front() {
                return Err(err);
            }
            s.submitted.push(extrinsic.to_vec());
            Ok(Self::submit_hash())
        })
    }

    async fn request<R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, TransportError> {
        self.record("request");
        let response = self.with(|s| {
            if method == "payment_queryInfo" {
                s.fee_params.push(params);
                s.fee_response.clone()
            } else {
                None
            }
        });
        let response = response
            .ok_or_else(|| TransportError::invalid_response(method, "no response configured"))?;
        serde_json::from_value(response).map_err(|e| TransportError::invalid_response(method, e))
    }

    async fn reconnect(&mut self) -> Result<(), TransportError> {
        self.record("reconnect");
        Ok(())
    }
}

mod frame {
    #![allow(dead_code, non_camel_case_types)]

    use frame_metadata::RuntimeMetadataPrefixed;
    use frame_metadata::v14::{
        ExtrinsicMetadata, PalletCallMetadata, PalletEventMetadata, PalletMetadata,
        RuntimeMetadataV14,
    };
    use parity_scale_codec::Encode;
    use scale_info::{TypeInfo, meta_type};

    type AccountId = [u8; 32];
    type Balance = u128;

    #[derive(Encode, TypeInfo)]
    enum MultiAddress {
        Id(AccountId),
        Index(#[codec(compact)] u32),
        Raw(Vec<u8>),
        Address32([u8; 32]),
        Address20([u8; 20]),
    }

    #[derive(Encode, TypeInfo)]
    enum SystemCall {
        #[codec(index = 1)]
        remark { remark: Vec<u8> },
    }

    #[derive(Encode, TypeInfo)]
    enum SystemEvent {
        #[codec(index = 0)]
        ExtrinsicSuccess,
        #[codec(index = 1)]
        Remarked { sender: AccountId, data: Vec<u8> },
    }

    #[derive(Encode, TypeInfo)]
    enum TimestampCall {
        #[codec(index = 0)]
        set {
            #[codec(compact)]
            now: u64,
        },
    }

    #[derive(Encode, TypeInfo)]
    enum BalancesCall {
        #[codec(index = 0)]
        transfer {
            dest: MultiAddress,
            #[codec(compact)]
            value: Balance,
        },
    }

    #[derive(Encode, TypeInfo)]
    enum BalancesEvent {
        #[codec(index = 2)]
        Transfer {
            from: AccountId,
            to: AccountId,
            amount: Balance,
        },
    }

    fn pallet(
        name: &'static str,
        index: u8,
        calls: Option<scale_info::MetaType>,
        event: Option<scale_info::MetaType>,
    ) -> PalletMetadata {
        PalletMetadata {
            name,
            storage: None,
            calls: calls.map(|ty| PalletCallMetadata { ty }),
            event: event.map(|ty| PalletEventMetadata { ty }),
            constants: vec![],
            error: None,
            index,
        }
    }

    pub fn metadata_bytes() -> Vec<u8> {
        let pallets = vec![
            pallet(
                "System",
                0,
                Some(meta_type::<SystemCall>()),
                Some(meta_type::<SystemEvent>()),
            ),
            pallet(
                "Timestamp",
                super::TIMESTAMP_PALLET,
                Some(meta_type::<TimestampCall>()),
                None,
            ),
            pallet(
                "Balances",
                super::BALANCES_PALLET,
                Some(meta_type::<BalancesCall>()),
                Some(meta_type::<BalancesEvent>()),
            ),
        ];
        let extrinsic = ExtrinsicMetadata {
            ty: meta_type::<()>(),
            version: 4,
            signed_extensions: vec![],
        };
        let v14 = RuntimeMetadataV14::new(pallets, extrinsic, meta_type::<()>());
        RuntimeMetadataPrefixed::from(v14).encode()
    }
}

/// `RuntimeMetadataPrefixed` bytes (V14) for a runtime with `System`,
/// `Timestamp` and `Balances`.
pub fn frame_metadata_bytes() -> Vec<u8> {
    frame::metadata_bytes()
}
