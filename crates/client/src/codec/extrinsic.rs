// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{MultiAddress, ensure_consumed, read_array};
use crate::error::DecodeError;
use parity_scale_codec::{Compact, Decode, Encode, Output};
use sp_runtime::generic::Era;
use std::fmt;

pub const EXTRINSIC_VERSION: u8 = 4;
const SIGNED_BIT: u8 = 0b1000_0000;

/// Pallet index and call index within the pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallIndex(pub [u8; 2]);

impl CallIndex {
    pub fn new(pallet: u8, call: u8) -> Self {
        Self([pallet, call])
    }

    pub fn pallet(&self) -> u8 {
        self.0[0]
    }

    pub fn call(&self) -> u8 {
        self.0[1]
    }
}

impl fmt::Display for CallIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Call index followed by the SCALE encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub index: CallIndex,
    pub args: Vec<u8>,
}

impl Call {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.args.len());
        out.extend_from_slice(&self.index.0);
        out.extend_from_slice(&self.args);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSignature {
    Ed25519([u8; 64]),
    Sr25519([u8; 64]),
    Ecdsa([u8; 65]),
}

impl MultiSignature {
    pub fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let discriminant = u8::decode(input)?;
        let signature = match discriminant {
            0 => MultiSignature::Ed25519(read_array(input)?),
            1 => MultiSignature::Sr25519(read_array(input)?),
            2 => MultiSignature::Ecdsa(read_array(input)?),
            value => {
                return Err(DecodeError::UnknownDiscriminant {
                    what: "MultiSignature",
                    value,
                });
            }
        };
        Ok(signature)
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MultiSignature::Ed25519(sig) | MultiSignature::Sr25519(sig) => &sig[..],
            MultiSignature::Ecdsa(sig) => &sig[..],
        }
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

impl Encode for MultiSignature {
    fn size_hint(&self) -> usize {
        1 + self.as_bytes().len()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        let discriminant = match self {
            MultiSignature::Ed25519(_) => 0,
            MultiSignature::Sr25519(_) => 1,
            MultiSignature::Ecdsa(_) => 2,
        };
        dest.push_byte(discriminant);
        dest.write(self.as_bytes());
    }
}

/// Signer, signature and the signed extras carried by a v4 extrinsic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    pub signer: MultiAddress,
    pub signature: MultiSignature,
    pub era: Era,
    pub nonce: u64,
    pub tip: u128,
}

impl SignatureBlock {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            signer: MultiAddress::decode(input)?,
            signature: MultiSignature::decode(input)?,
            era: Era::decode(input)?,
            nonce: Compact::<u64>::decode(input)?.0,
            tip: Compact::<u128>::decode(input)?.0,
        })
    }

    fn encode_to(&self, out: &mut Vec<u8>) {
        self.signer.encode_to(out);
        self.signature.encode_to(out);
        self.era.encode_to(out);
        Compact(self.nonce).encode_to(out);
        Compact(self.tip).encode_to(out);
    }

    pub fn era_hex(&self) -> String {
        format!("0x{}", hex::encode(self.era.encode()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicEnvelope {
    pub signature: Option<SignatureBlock>,
    pub call: Call,
}

impl ExtrinsicEnvelope {
    pub fn unsigned(call: Call) -> Self {
        Self {
            signature: None,
            call,
        }
    }

    pub fn signed(signature: SignatureBlock, call: Call) -> Self {
        Self {
            signature: Some(signature),
            call,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Decodes an extrinsic as it appears in a block body, with its length prefix.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut input = bytes;
        let len = Compact::<u32>::decode(&mut input)?.0 as usize;
        if len != input.len() {
            return Err(DecodeError::Malformed(format!(
                "extrinsic length prefix says {} bytes, found {}",
                len,
                input.len()
            )));
        }
        Self::decode_body(input)
    }

    /// Decodes an extrinsic without its length prefix.
    pub fn decode_body(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut input = bytes;
        let version = u8::decode(&mut input)?;
        if version & !SIGNED_BIT != EXTRINSIC_VERSION {
            return Err(DecodeError::UnsupportedVersion(version & !SIGNED_BIT));
        }

        let signature = if version & SIGNED_BIT != 0 {
            Some(SignatureBlock::decode(&mut input)?)
        } else {
            None
        };

        let index = CallIndex(read_array(&mut input)?);
        let args = input.to_vec();

        tracing::trace!(
            signed = signature.is_some(),
            call_index = %index,
            args_len = args.len(),
            "Decoded extrinsic"
        );

        Ok(Self {
            signature,
            call: Call { index, args },
        })
    }

    /// Version byte, signature block when signed, then the call.
    pub fn encode_body(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match &self.signature {
            Some(block) => {
                out.push(EXTRINSIC_VERSION | SIGNED_BIT);
                block.encode_to(&mut out);
            }
            None => out.push(EXTRINSIC_VERSION),
        }
        out.extend_from_slice(&self.call.encode());
        out
    }

    /// Full encoding with the compact length prefix.
    pub fn encode(&self) -> Vec<u8> {
        let body = self.encode_body();
        let mut out = Compact(body.len() as u32).encode();
        out.extend_from_slice(&body);
        out
    }

    pub fn encoded_len(&self) -> usize {
        self.encode_body().len()
    }
}

/// Reads the sole compact argument of a call such as `Timestamp.set`.
pub(crate) fn decode_single_compact(args: &[u8]) -> Result<u64, DecodeError> {
    let mut input = args;
    let value = Compact::<u64>::decode(&mut input)?.0;
    ensure_consumed(input)?;
    Ok(value)
}
