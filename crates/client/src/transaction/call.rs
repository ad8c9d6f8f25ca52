// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::codec::{Call, Codec, MultiAddress};
use crate::error::{ClientError, ResultExt, ValidationError};
use crate::metadata::{FieldKind, FieldSpec, RuntimeMetadata, TypeId};
use parity_scale_codec::{Compact, Encode};
use scale_info::form::PortableForm;
use scale_info::{TypeDef, TypeDefPrimitive};

/// A positional call argument, encoded against the type the runtime declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    Bool(bool),
    UInt(u128),
    Text(String),
    Bytes(Vec<u8>),
    Account([u8; 32]),
    Address(MultiAddress),
    /// Already SCALE encoded. Accepted for any declared type.
    Encoded(Vec<u8>),
}

impl From<MultiAddress> for CallArg {
    fn from(address: MultiAddress) -> Self {
        CallArg::Address(address)
    }
}

impl From<u128> for CallArg {
    fn from(value: u128) -> Self {
        CallArg::UInt(value)
    }
}

/// Resolves calls by name and encodes their arguments.
pub struct CallBuilder<'a> {
    metadata: &'a RuntimeMetadata,
    codec: &'a Codec,
}

impl<'a> CallBuilder<'a> {
    pub fn new(metadata: &'a RuntimeMetadata, codec: &'a Codec) -> Self {
        Self { metadata, codec }
    }

    /// Builds `"Pallet.call"` with `args` in declaration order.
    pub fn build(&self, name: &str, args: &[CallArg]) -> Result<Call, ClientError> {
        let entry = self.metadata.find_call(name).context("build call")?;

        if entry.args.len() != args.len() {
            return Err(ValidationError::ArityMismatch {
                call: name.to_string(),
                expected: entry.args.len(),
                got: args.len(),
            })
            .context("build call");
        }

        let mut encoded = Vec::new();
        for (index, (field, arg)) in entry.args.iter().zip(args).enumerate() {
            let mismatch = || ValidationError::ArgumentMismatch {
                call: name.to_string(),
                index,
                expected: self.metadata.describe_type(field.ty),
            };
            self.encode_field(field, arg, &mut encoded)
                .ok_or_else(mismatch)
                .context("build call")?;
        }

        tracing::debug!(call = %name, index = %entry.index, args_len = encoded.len(), "Built call");
        Ok(Call {
            index: entry.index,
            args: encoded,
        })
    }

    fn encode_field(&self, field: &FieldSpec, arg: &CallArg, out: &mut Vec<u8>) -> Option<()> {
        if field.kind == FieldKind::LegacyAddress {
            let account = match arg {
                CallArg::Account(id) => *id,
                CallArg::Address(address) => *address.account_id()?,
                CallArg::Encoded(bytes) => {
                    out.extend_from_slice(bytes);
                    return Some(());
                }
                _ => return None,
            };
            out.extend_from_slice(&self.codec.encode_address(&account));
            return Some(());
        }
        self.encode_arg(field.ty, arg, out)
    }

    fn type_def(&self, ty: TypeId) -> Option<&'a TypeDef<PortableForm>> {
        self.metadata.types().resolve(ty).map(|t| &t.type_def)
    }

    /// Appends `arg` encoded as type `ty`; `None` if the shapes do not fit.
    fn encode_arg(&self, ty: TypeId, arg: &CallArg, out: &mut Vec<u8>) -> Option<()> {
        if let CallArg::Encoded(bytes) = arg {
            out.extend_from_slice(bytes);
            return Some(());
        }

        match (self.type_def(ty)?, arg) {
            (TypeDef::Primitive(TypeDefPrimitive::Bool), CallArg::Bool(b)) => b.encode_to(out),
            (TypeDef::Primitive(TypeDefPrimitive::Str), CallArg::Text(s)) => s.encode_to(out),
            (TypeDef::Primitive(p), CallArg::UInt(v)) => {
                let width = unsigned_width(p)?;
                if width < 16 && *v >> (width * 8) != 0 {
                    return None;
                }
                out.extend_from_slice(&v.to_le_bytes()[..width.min(16)]);
                if width > 16 {
                    out.extend_from_slice(&[0u8; 16]);
                }
            }
            (TypeDef::Compact(compact), CallArg::UInt(v)) => {
                if let Some(max) = self.compact_max(compact.type_param.id)
                    && *v > max
                {
                    return None;
                }
                Compact(*v).encode_to(out);
            }
            (TypeDef::Sequence(seq), CallArg::Bytes(bytes)) if self.is_u8(seq.type_param.id) => {
                bytes.encode_to(out)
            }
            (TypeDef::Sequence(seq), CallArg::Text(text)) if self.is_u8(seq.type_param.id) => {
                text.as_bytes().encode_to(out)
            }
            (TypeDef::Array(array), CallArg::Bytes(bytes))
                if self.is_u8(array.type_param.id) && bytes.len() == array.len as usize =>
            {
                out.extend_from_slice(bytes)
            }
            (TypeDef::Array(array), CallArg::Account(id))
                if array.len == 32 && self.is_u8(array.type_param.id) =>
            {
                out.extend_from_slice(id)
            }
            (TypeDef::Composite(composite), _) if composite.fields.len() == 1 => {
                return self.encode_field(&FieldSpec::from(&composite.fields[0]), arg, out);
            }
            (TypeDef::Variant(def), CallArg::Address(address)) => {
                let variant = def
                    .variants
                    .iter()
                    .find(|v| v.name == address.variant_name())?;
                out.push(variant.index);
                address.encode_payload_to(out);
            }
            (TypeDef::Variant(_), CallArg::Account(id)) => {
                return self.encode_arg(ty, &CallArg::Address(MultiAddress::AccountId32(*id)), out);
            }
            _ => return None,
        }
        Some(())
    }

    fn is_u8(&self, ty: TypeId) -> bool {
        matches!(
            self.type_def(ty),
            Some(TypeDef::Primitive(TypeDefPrimitive::U8))
        )
    }

    /// Largest value a compact of `inner` may carry, if it is bounded below u128.
    fn compact_max(&self, inner: TypeId) -> Option<u128> {
        let width = match self.type_def(inner)? {
            TypeDef::Primitive(p) => unsigned_width(p)?,
            TypeDef::Composite(composite) if composite.fields.len() == 1 => {
                return self.compact_max(composite.fields[0].ty.id);
            }
            _ => return None,
        };
        (width < 16).then(|| (1u128 << (width * 8)) - 1)
    }
}

/// Byte width of unsigned integer primitives.
fn unsigned_width(p: &TypeDefPrimitive) -> Option<usize> {
    match p {
        TypeDefPrimitive::U8 => Some(1),
        TypeDefPrimitive::U16 => Some(2),
        TypeDefPrimitive::U32 => Some(4),
        TypeDefPrimitive::U64 => Some(8),
        TypeDefPrimitive::U128 => Some(16),
        TypeDefPrimitive::U256 => Some(32),
        _ => None,
    }
}
