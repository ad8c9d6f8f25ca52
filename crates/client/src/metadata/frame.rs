// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{FieldSpec, RuntimeMetadata};
use crate::error::DecodeError;
use frame_metadata::{RuntimeMetadata as FrameRuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Decode;
use scale_info::form::PortableForm;
use scale_info::{PortableRegistry, TypeDef, Variant};

/// Turns raw metadata bytes into the client's lookup table.
pub trait MetadataDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<RuntimeMetadata, DecodeError>;
}

/// Decoder for `RuntimeMetadataPrefixed` in versions 14 and 15.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameMetadataDecoder;

/// The parts of a pallet both supported metadata versions share.
struct PalletView<'a> {
    name: &'a str,
    index: u8,
    calls: Option<u32>,
    event: Option<u32>,
}

impl MetadataDecoder for FrameMetadataDecoder {
    fn decode(&self, raw: &[u8]) -> Result<RuntimeMetadata, DecodeError> {
        let prefixed = RuntimeMetadataPrefixed::decode(&mut &raw[..])?;

        match prefixed.1 {
            FrameRuntimeMetadata::V14(md) => {
                let pallets = md.pallets.iter().map(|p| PalletView {
                    name: &p.name,
                    index: p.index,
                    calls: p.calls.as_ref().map(|c| c.ty.id),
                    event: p.event.as_ref().map(|e| e.ty.id),
                });
                build(&md.types, pallets)
            }
            FrameRuntimeMetadata::V15(md) => {
                let pallets = md.pallets.iter().map(|p| PalletView {
                    name: &p.name,
                    index: p.index,
                    calls: p.calls.as_ref().map(|c| c.ty.id),
                    event: p.event.as_ref().map(|e| e.ty.id),
                });
                build(&md.types, pallets)
            }
            other => Err(DecodeError::InvalidMetadata(format!(
                "unsupported metadata version {}",
                other.version()
            ))),
        }
    }
}

fn build<'a>(
    registry: &PortableRegistry,
    pallets: impl Iterator<Item = PalletView<'a>>,
) -> Result<RuntimeMetadata, DecodeError> {
    let mut builder = RuntimeMetadata::builder(registry.clone());

    for pallet in pallets {
        if let Some(id) = pallet.calls {
            for variant in enum_variants(registry, id, pallet.name)? {
                builder.add_call(
                    pallet.name,
                    pallet.index,
                    &variant.name,
                    variant.index,
                    variant.fields.iter().map(FieldSpec::from).collect(),
                );
            }
        }
        if let Some(id) = pallet.event {
            for variant in enum_variants(registry, id, pallet.name)? {
                builder.add_event(
                    pallet.name,
                    pallet.index,
                    &variant.name,
                    variant.index,
                    variant.fields.iter().map(FieldSpec::from).collect(),
                );
            }
        }
    }

    Ok(builder.build())
}

fn enum_variants<'r>(
    registry: &'r PortableRegistry,
    id: u32,
    pallet: &str,
) -> Result<&'r [Variant<PortableForm>], DecodeError> {
    let ty = registry.resolve(id).ok_or(DecodeError::UnknownType(id))?;
    match &ty.type_def {
        TypeDef::Variant(def) => Ok(&def.variants),
        _ => Err(DecodeError::InvalidMetadata(format!(
            "call or event type {} of pallet {} is not an enum",
            id, pallet
        ))),
    }
}
