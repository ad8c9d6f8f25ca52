// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Balance, Codec};
use crate::error::DecodeError;
use crate::metadata::{FieldKind, FieldSpec, TypeId};
use scale_decode::{
    Visitor,
    visitor::{TypeIdFor, Unexpected, types::Composite},
};
use scale_info::PortableRegistry;
use scale_type_resolver::TypeResolver;
use scale_value::ValueDef;

/// A decoded field value without type context.
pub type Value = scale_value::Value<()>;

/// Accessors for the shapes transfer events carry.
pub trait ValueExt {
    fn as_amount(&self) -> Option<u128>;
    fn as_account_id(&self) -> Option<[u8; 32]>;
}

/// Unwraps single-field composites such as `AccountId32([u8; 32])`.
fn newtype_inner(value: &Value) -> &Value {
    match &value.value {
        ValueDef::Composite(composite) => {
            let mut values = composite.values();
            match (values.next(), values.next()) {
                (Some(inner), None) => newtype_inner(inner),
                _ => value,
            }
        }
        _ => value,
    }
}

impl ValueExt for Value {
    fn as_amount(&self) -> Option<u128> {
        newtype_inner(self).as_u128()
    }

    fn as_account_id(&self) -> Option<[u8; 32]> {
        let ValueDef::Composite(composite) = &newtype_inner(self).value else {
            return None;
        };
        let bytes = composite
            .values()
            .map(|v| v.as_u128().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()?;
        bytes.try_into().ok()
    }
}

/// Reads an unsigned amount, applying the all-0xFF sentinel to 16 byte values.
struct BalanceVisitor<R> {
    _marker: core::marker::PhantomData<R>,
}

impl<R> BalanceVisitor<R> {
    fn new() -> Self {
        Self {
            _marker: core::marker::PhantomData,
        }
    }
}

impl<R> Visitor for BalanceVisitor<R>
where
    R: TypeResolver,
{
    type Value<'scale, 'resolver> = u128;
    type Error = scale_decode::Error;
    type TypeResolver = R;

    fn visit_u128<'scale, 'resolver>(
        self,
        value: u128,
        _type_id: TypeIdFor<Self>,
    ) -> Result<Self::Value<'scale, 'resolver>, Self::Error> {
        Ok(Balance::from_raw(value).0)
    }

    fn visit_u64<'scale, 'resolver>(
        self,
        value: u64,
        _type_id: TypeIdFor<Self>,
    ) -> Result<Self::Value<'scale, 'resolver>, Self::Error> {
        Ok(value.into())
    }

    fn visit_u32<'scale, 'resolver>(
        self,
        value: u32,
        _type_id: TypeIdFor<Self>,
    ) -> Result<Self::Value<'scale, 'resolver>, Self::Error> {
        Ok(value.into())
    }

    fn visit_composite<'scale, 'resolver>(
        self,
        value: &mut Composite<'scale, 'resolver, Self::TypeResolver>,
        _type_id: TypeIdFor<Self>,
    ) -> Result<Self::Value<'scale, 'resolver>, Self::Error> {
        match value.decode_item(BalanceVisitor::new()) {
            Some(amount) => amount,
            None => Err(parity_scale_codec::Error::from("Expected a wrapped amount").into()),
        }
    }

    fn visit_unexpected<'scale, 'resolver>(
        self,
        _unexpected: Unexpected,
    ) -> Result<Self::Value<'scale, 'resolver>, Self::Error> {
        Err(parity_scale_codec::Error::from("Expected an unsigned amount").into())
    }
}

/// Decodes one value of type `id` from the runtime's registry.
pub fn decode_value(
    types: &PortableRegistry,
    id: TypeId,
    input: &mut &[u8],
) -> Result<Value, DecodeError> {
    if types.resolve(id).is_none() {
        return Err(DecodeError::UnknownType(id));
    }
    scale_value::scale::decode_as_type(input, id, types)
        .map(|value| value.remove_context())
        .map_err(|e| DecodeError::Malformed(e.to_string()))
}

impl Codec {
    pub fn decode_fields(
        &self,
        types: &PortableRegistry,
        fields: &[FieldSpec],
        input: &mut &[u8],
    ) -> Result<Vec<(Option<String>, Value)>, DecodeError> {
        fields
            .iter()
            .map(|field| {
                let value = self.decode_field(types, field, input)?;
                Ok((field.name.clone(), value))
            })
            .collect()
    }

    fn decode_field(
        &self,
        types: &PortableRegistry,
        field: &FieldSpec,
        input: &mut &[u8],
    ) -> Result<Value, DecodeError> {
        match field.kind {
            FieldKind::LegacyAddress => {
                let address = self.decode_address(input)?;
                Ok(Value::from_bytes(address.as_bytes()))
            }
            FieldKind::Balance => {
                let mut attempt = *input;
                match scale_decode::visitor::decode_with_visitor(
                    &mut attempt,
                    field.ty,
                    types,
                    BalanceVisitor::new(),
                ) {
                    Ok(amount) => {
                        *input = attempt;
                        Ok(Value::u128(amount))
                    }
                    // Named like a balance but shaped otherwise.
                    Err(_) => decode_value(types, field.ty, input),
                }
            }
            FieldKind::Plain => decode_value(types, field.ty, input),
        }
    }
}
