// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! A scripted node behind `MockRpcClient`, answering the JSON-RPC methods the
//! client uses with a V14 metadata blob and one block holding a transfer.

#![allow(dead_code, non_camel_case_types)]

use frame_metadata::RuntimeMetadataPrefixed;
use frame_metadata::v14::{
    ExtrinsicMetadata, PalletCallMetadata, PalletEventMetadata, PalletMetadata, RuntimeMetadataV14,
};
use parity_scale_codec::{Compact, Encode};
use scale_info::{TypeInfo, meta_type};
use serde_json::{Value, json, value::RawValue};
use sp_core::H256;
use sp_runtime::generic::Era;
use std::sync::{Arc, Mutex};
use substrate_tx_client::codec::{
    Call, CallIndex, ExtrinsicEnvelope, MultiAddress, MultiSignature, SignatureBlock,
};
use substrate_tx_client::utils::hash::{system_events_key, to_hex};
use subxt_rpcs::client::mock_rpc_client::Json as MockJson;
use subxt_rpcs::client::{MockRpcClient, RpcClient};

pub const ALICE: [u8; 32] = [0xaa; 32];
pub const BOB: [u8; 32] = [0xbb; 32];

pub const SPEC_VERSION: u32 = 100;
pub const TRANSACTION_VERSION: u32 = 2;
pub const BLOCK_NUMBER: u64 = 7;
pub const TIMESTAMP_MILLIS: u64 = 1_690_000_000_500;
pub const TRANSFER_AMOUNT: u128 = 12_345;
pub const PARTIAL_FEE: &str = "125000000";

pub fn genesis_hash() -> H256 {
    H256::repeat_byte(0x01)
}

pub fn block_hash() -> H256 {
    H256::repeat_byte(0x07)
}

pub fn parent_hash() -> H256 {
    H256::repeat_byte(0x06)
}

pub fn submitted_hash() -> H256 {
    H256::repeat_byte(0xcc)
}

type AccountId = [u8; 32];
type Balance = u128;

#[derive(Encode, TypeInfo)]
enum TestMultiAddress {
    Id(AccountId),
    Index(#[codec(compact)] u32),
    Raw(Vec<u8>),
    Address32([u8; 32]),
    Address20([u8; 20]),
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
        dest: TestMultiAddress,
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

#[derive(Encode, TypeInfo)]
enum SystemCall {
    #[codec(index = 1)]
    remark { remark: Vec<u8> },
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
        pallet("System", 0, Some(meta_type::<SystemCall>()), None),
        pallet("Timestamp", 3, Some(meta_type::<TimestampCall>()), None),
        pallet(
            "Balances",
            5,
            Some(meta_type::<BalancesCall>()),
            Some(meta_type::<BalancesEvent>()),
        ),
    ];
    let extrinsic = ExtrinsicMetadata {
        ty: meta_type::<()>(),
        version: 4,
        signed_extensions: vec![],
    };
    RuntimeMetadataPrefixed::from(RuntimeMetadataV14::new(
        pallets,
        extrinsic,
        meta_type::<()>(),
    ))
    .encode()
}

pub fn timestamp_ext() -> Vec<u8> {
    ExtrinsicEnvelope::unsigned(Call {
        index: CallIndex::new(3, 0),
        args: Compact(TIMESTAMP_MILLIS).encode(),
    })
    .encode()
}

pub fn transfer_ext() -> Vec<u8> {
    let mut args = MultiAddress::AccountId32(BOB).encode();
    Compact(TRANSFER_AMOUNT).encode_to(&mut args);
    ExtrinsicEnvelope::signed(
        SignatureBlock {
            signer: MultiAddress::AccountId32(ALICE),
            signature: MultiSignature::Sr25519([0x42; 64]),
            era: Era::mortal(64, 5),
            nonce: 3,
            tip: 0,
        },
        Call {
            index: CallIndex::new(5, 0),
            args,
        },
    )
    .encode()
}

/// `System.Events`: an initialization event is skipped, the transfer maps to extrinsic 1.
pub fn events() -> Vec<u8> {
    let mut out = Compact(2u32).encode();

    out.push(2);
    out.extend_from_slice(&[5, 2]);
    out.extend_from_slice(&BOB);
    out.extend_from_slice(&ALICE);
    1u128.encode_to(&mut out);
    Vec::<[u8; 32]>::new().encode_to(&mut out);

    out.push(0);
    1u32.encode_to(&mut out);
    out.extend_from_slice(&[5, 2]);
    out.extend_from_slice(&ALICE);
    out.extend_from_slice(&BOB);
    TRANSFER_AMOUNT.encode_to(&mut out);
    Vec::<[u8; 32]>::new().encode_to(&mut out);
    out
}

/// What the scripted node saw.
#[derive(Debug, Default)]
pub struct NodeLog {
    pub fee_params: Vec<Value>,
    pub submitted: Vec<String>,
    pub storage_keys: Vec<String>,
}

fn params_of(params: Option<Box<RawValue>>) -> Value {
    params
        .and_then(|p| serde_json::from_str::<Value>(p.get()).ok())
        .unwrap_or(Value::Null)
}

pub fn mock_node(log: Arc<Mutex<NodeLog>>) -> RpcClient {
    let fee_log = log.clone();
    let submit_log = log.clone();
    let storage_log = log;

    let mock = MockRpcClient::builder()
        .method_handler("state_getRuntimeVersion", async |_params| {
            MockJson(json!({
                "specName": "node-template",
                "implName": "node-template",
                "specVersion": SPEC_VERSION,
                "implVersion": 1,
                "transactionVersion": TRANSACTION_VERSION,
                "apis": []
            }))
        })
        .method_handler("state_getMetadata", async |_params| {
            MockJson(json!(to_hex(&metadata_bytes())))
        })
        .method_handler("chain_getBlockHash", async |params| {
            let hash = match params_of(params)[0].as_u64() {
                Some(0) => json!(to_hex(genesis_hash().as_bytes())),
                Some(BLOCK_NUMBER) => json!(to_hex(block_hash().as_bytes())),
                _ => Value::Null,
            };
            MockJson(hash)
        })
        .method_handler("chain_getBlock", async |params| {
            let requested = params_of(params)[0].as_str().map(String::from);
            if requested.as_deref() != Some(to_hex(block_hash().as_bytes()).as_str()) {
                return MockJson(Value::Null);
            }
            MockJson(json!({
                "block": {
                    "header": {
                        "parentHash": to_hex(parent_hash().as_bytes()),
                        "number": format!("0x{:x}", BLOCK_NUMBER),
                    },
                    "extrinsics": [to_hex(&timestamp_ext()), to_hex(&transfer_ext())]
                },
                "justifications": null
            }))
        })
        .method_handler("state_getStorage", move |params: Option<Box<RawValue>>| {
            let log = storage_log.clone();
            async move {
                let key = params_of(params)[0].as_str().unwrap_or_default().to_string();
                log.lock().unwrap().storage_keys.push(key.clone());
                if key == to_hex(&system_events_key()) {
                    MockJson(json!(to_hex(&events())))
                } else {
                    MockJson(Value::Null)
                }
            }
        })
        .method_handler("payment_queryInfo", move |params: Option<Box<RawValue>>| {
            let log = fee_log.clone();
            async move {
                log.lock().unwrap().fee_params.push(params_of(params));
                MockJson(json!({
                    "weight": { "refTime": 1, "proofSize": 0 },
                    "class": "normal",
                    "partialFee": PARTIAL_FEE
                }))
            }
        })
        .method_handler("author_submitExtrinsic", move |params: Option<Box<RawValue>>| {
            let log = submit_log.clone();
            async move {
                let hex = params_of(params)[0].as_str().unwrap_or_default().to_string();
                log.lock().unwrap().submitted.push(hex);
                MockJson(json!(to_hex(submitted_hash().as_bytes())))
            }
        })
        .build();

    RpcClient::new(mock)
}
