// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Codec, read_array};
use crate::error::DecodeError;
use parity_scale_codec::{Compact, Decode, Encode, Output};

const ACCOUNT_ID_MARKER: u8 = 0xFF;

/// Pre-`MultiAddress` address encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// `0xFF` marker followed by a 32 byte account id.
    AccountId([u8; 32]),
    /// Marker byte plus 31 payload bytes, kept verbatim.
    Raw([u8; 32]),
}

impl Address {
    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            Address::AccountId(bytes) | Address::Raw(bytes) => bytes,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Address::AccountId(id) => {
                let mut out = Vec::with_capacity(33);
                out.push(ACCOUNT_ID_MARKER);
                out.extend_from_slice(id);
                out
            }
            Address::Raw(payload) => payload.to_vec(),
        }
    }
}

impl Codec {
    pub fn decode_address(&self, input: &mut &[u8]) -> Result<Address, DecodeError> {
        let marker = u8::decode(input)?;
        if marker == ACCOUNT_ID_MARKER && !self.config.legacy_pallet_indices {
            return Ok(Address::AccountId(read_array(input)?));
        }

        let rest: [u8; 31] = read_array(input)?;
        let mut payload = [0u8; 32];
        payload[0] = marker;
        payload[1..].copy_from_slice(&rest);
        Ok(Address::Raw(payload))
    }

    /// Encodes `account` in the form [`Codec::decode_address`] reads back.
    ///
    /// In legacy pallet index mode the marker byte is never written.
    pub fn encode_address(&self, account: &[u8; 32]) -> Vec<u8> {
        if self.config.legacy_pallet_indices {
            Address::Raw(*account).encode()
        } else {
            Address::AccountId(*account).encode()
        }
    }
}

/// Tagged address union used by signers and balance calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiAddress {
    AccountId32([u8; 32]),
    CompactIndex(u32),
    Address32([u8; 32]),
    Address20([u8; 20]),
}

impl MultiAddress {
    pub fn discriminant(&self) -> u8 {
        match self {
            MultiAddress::AccountId32(_) => 0,
            MultiAddress::CompactIndex(_) => 1,
            MultiAddress::Address32(_) => 2,
            MultiAddress::Address20(_) => 3,
        }
    }

    /// Variant name as it appears in runtime metadata.
    pub fn variant_name(&self) -> &'static str {
        match self {
            MultiAddress::AccountId32(_) => "Id",
            MultiAddress::CompactIndex(_) => "Index",
            MultiAddress::Address32(_) => "Address32",
            MultiAddress::Address20(_) => "Address20",
        }
    }

    pub fn account_id(&self) -> Option<&[u8; 32]> {
        match self {
            MultiAddress::AccountId32(id) => Some(id),
            _ => None,
        }
    }

    pub fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let discriminant = u8::decode(input)?;
        let address = match discriminant {
            0 => MultiAddress::AccountId32(read_array(input)?),
            1 => MultiAddress::CompactIndex(Compact::<u32>::decode(input)?.0),
            2 => MultiAddress::Address32(read_array(input)?),
            3 => MultiAddress::Address20(read_array(input)?),
            value => {
                return Err(DecodeError::UnknownDiscriminant {
                    what: "MultiAddress",
                    value,
                });
            }
        };
        Ok(address)
    }

    /// Payload without the discriminant byte.
    pub(crate) fn encode_payload_to<T: Output + ?Sized>(&self, dest: &mut T) {
        match self {
            MultiAddress::AccountId32(id) | MultiAddress::Address32(id) => dest.write(id),
            MultiAddress::CompactIndex(index) => Compact(*index).encode_to(dest),
            MultiAddress::Address20(addr) => dest.write(addr),
        }
    }
}

impl Encode for MultiAddress {
    fn size_hint(&self) -> usize {
        match self {
            MultiAddress::AccountId32(_) | MultiAddress::Address32(_) => 33,
            MultiAddress::CompactIndex(_) => 6,
            MultiAddress::Address20(_) => 21,
        }
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.push_byte(self.discriminant());
        self.encode_payload_to(dest);
    }
}

impl From<[u8; 32]> for MultiAddress {
    fn from(id: [u8; 32]) -> Self {
        MultiAddress::AccountId32(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;

    fn codec(legacy_pallet_indices: bool) -> Codec {
        Codec::new(CodecConfig {
            legacy_pallet_indices,
            ..Default::default()
        })
    }

    #[test]
    fn test_multi_address_round_trip_every_arm() {
        let cases = [
            MultiAddress::AccountId32([1; 32]),
            MultiAddress::CompactIndex(0),
            MultiAddress::CompactIndex(1 << 20),
            MultiAddress::Address32([2; 32]),
            MultiAddress::Address20([3; 20]),
        ];
        for address in cases {
            let encoded = address.encode();
            assert_eq!(encoded[0], address.discriminant());
            let mut input = &encoded[..];
            assert_eq!(MultiAddress::decode(&mut input).unwrap(), address);
            assert!(input.is_empty());
        }
    }

    #[test]
    fn test_multi_address_unknown_discriminant() {
        let mut bytes = vec![4u8];
        bytes.extend_from_slice(&[0; 32]);
        assert_eq!(
            MultiAddress::decode(&mut &bytes[..]).unwrap_err(),
            DecodeError::UnknownDiscriminant {
                what: "MultiAddress",
                value: 4
            }
        );
    }

    #[test]
    fn test_multi_address_truncated_payload() {
        let bytes = [0u8; 10];
        assert!(matches!(
            MultiAddress::decode(&mut &bytes[..]),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_compact_index_encoding() {
        assert_eq!(MultiAddress::CompactIndex(1).encode(), vec![1, 4]);
    }

    #[test]
    fn test_address_marker_reads_account_id() {
        let mut bytes = vec![0xFF];
        bytes.extend_from_slice(&[9; 32]);
        let mut input = &bytes[..];
        let address = codec(false).decode_address(&mut input).unwrap();
        assert_eq!(address, Address::AccountId([9; 32]));
        assert!(input.is_empty());
        assert_eq!(address.encode(), bytes);
    }

    #[test]
    fn test_address_marker_ignored_in_legacy_mode() {
        let mut bytes = vec![0xFF];
        bytes.extend_from_slice(&[9; 32]);
        let mut input = &bytes[..];
        let address = codec(true).decode_address(&mut input).unwrap();

        let mut expected = [9u8; 32];
        expected[0] = 0xFF;
        assert_eq!(address, Address::Raw(expected));
        // One byte of the would-be account id is left unread.
        assert_eq!(input, &[9]);
    }

    #[test]
    fn test_address_other_marker_keeps_prefix() {
        let mut bytes = vec![0x2A];
        bytes.extend_from_slice(&[5; 31]);
        let address = codec(false).decode_address(&mut &bytes[..]).unwrap();
        assert_eq!(address.as_bytes()[0], 0x2A);
        assert_eq!(address.as_bytes()[1..], [5; 31]);
        assert_eq!(address.encode(), bytes);
    }

    #[test]
    fn test_encode_address_reads_back_in_both_modes() {
        for legacy in [false, true] {
            let codec = codec(legacy);
            let encoded = codec.encode_address(&[0xFF; 32]);
            let mut input = &encoded[..];
            let address = codec.decode_address(&mut input).unwrap();
            assert_eq!(address.as_bytes(), &[0xFF; 32]);
            assert!(input.is_empty());
        }
        assert_eq!(codec(false).encode_address(&[1; 32]).len(), 33);
        assert_eq!(codec(true).encode_address(&[1; 32]).len(), 32);
    }

    #[test]
    fn test_address_truncated() {
        let bytes = [0xFF; 20];
        assert!(codec(false).decode_address(&mut &bytes[..]).is_err());
    }
}
