// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime metadata reduced to the lookups the client needs: call indices
//! with their argument types and event layouts. Field types point into the
//! runtime's own `PortableRegistry`.

mod cache;
mod frame;

pub use cache::{CachedRuntime, Freshness, MetadataCache};
pub use frame::{FrameMetadataDecoder, MetadataDecoder};

use crate::codec::CallIndex;
use crate::error::{LookupError, ValidationError};
use scale_info::form::PortableForm;
use scale_info::{Field, PortableRegistry, TypeDef};
use std::collections::HashMap;

pub type TypeId = u32;

/// How a field is decoded when its declared type name carries chain quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Plain,
    /// Amount with the all-0xFF sentinel. Only affects 16 byte integers.
    Balance,
    /// Pre-`MultiAddress` address.
    LegacyAddress,
}

impl FieldKind {
    /// Classifies a field from the type name recorded in metadata.
    pub fn from_type_name(type_name: Option<&str>) -> Self {
        let Some(name) = type_name else {
            return FieldKind::Plain;
        };
        let short = name.rsplit("::").next().unwrap_or(name);
        match short {
            "Address" | "LookupSource" => FieldKind::LegacyAddress,
            _ if short.contains("Balance") => FieldKind::Balance,
            _ => FieldKind::Plain,
        }
    }
}

/// A call argument or event field: its registry type and decode quirk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Option<String>,
    pub ty: TypeId,
    pub type_name: Option<String>,
    pub kind: FieldKind,
}

impl From<&Field<PortableForm>> for FieldSpec {
    fn from(field: &Field<PortableForm>) -> Self {
        Self {
            name: field.name.clone(),
            ty: field.ty.id,
            type_name: field.type_name.clone(),
            kind: FieldKind::from_type_name(field.type_name.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEntry {
    pub pallet: String,
    pub name: String,
    pub index: CallIndex,
    pub args: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub pallet: String,
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// Splits `"Pallet.call"` into its two halves.
pub fn split_call_name(name: &str) -> Result<(&str, &str), ValidationError> {
    match name.split_once('.') {
        Some((pallet, call)) if !pallet.is_empty() && !call.is_empty() => Ok((pallet, call)),
        _ => Err(ValidationError::InvalidCallName(name.to_string())),
    }
}

/// Lookup tables derived from one runtime version's metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    calls: HashMap<(String, String), CallEntry>,
    events: HashMap<[u8; 2], EventEntry>,
    types: PortableRegistry,
}

impl RuntimeMetadata {
    pub fn builder(types: PortableRegistry) -> MetadataBuilder {
        MetadataBuilder {
            metadata: RuntimeMetadata {
                calls: HashMap::new(),
                events: HashMap::new(),
                types,
            },
        }
    }

    pub fn types(&self) -> &PortableRegistry {
        &self.types
    }

    /// Short human description of a type, used in argument errors.
    pub fn describe_type(&self, id: TypeId) -> String {
        let Some(ty) = self.types.resolve(id) else {
            return format!("unknown type {}", id);
        };
        if let Some(ident) = ty.path.ident() {
            return ident;
        }
        match &ty.type_def {
            TypeDef::Primitive(p) => format!("{:?}", p).to_lowercase(),
            TypeDef::Compact(c) => format!("Compact<{}>", self.describe_type(c.type_param.id)),
            TypeDef::Sequence(s) => format!("Vec<{}>", self.describe_type(s.type_param.id)),
            TypeDef::Array(a) => format!("[{}; {}]", self.describe_type(a.type_param.id), a.len),
            TypeDef::Tuple(t) => format!("tuple of {}", t.fields.len()),
            TypeDef::Composite(_) => "struct".to_string(),
            TypeDef::Variant(v) => {
                let names: Vec<&str> = v.variants.iter().map(|v| v.name.as_str()).collect();
                format!("enum {{{}}}", names.join(", "))
            }
            TypeDef::BitSequence(_) => "BitVec".to_string(),
        }
    }

    pub fn call(&self, pallet: &str, name: &str) -> Option<&CallEntry> {
        self.calls.get(&(pallet.to_string(), name.to_string()))
    }

    /// Resolves a dotted call name such as `"Balances.transfer"`.
    pub fn find_call(&self, dotted: &str) -> Result<&CallEntry, LookupError> {
        let (pallet, name) = split_call_name(dotted)
            .map_err(|_| LookupError::UnknownCall(dotted.to_string()))?;
        self.call(pallet, name)
            .ok_or_else(|| LookupError::UnknownCall(dotted.to_string()))
    }

    pub fn event(&self, pallet_index: u8, event_index: u8) -> Option<&EventEntry> {
        self.events.get(&[pallet_index, event_index])
    }

    pub fn has_event(&self, pallet: &str, name: &str) -> bool {
        self.events
            .values()
            .any(|e| e.pallet == pallet && e.name == name)
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Assembles a [`RuntimeMetadata`] table entry by entry over a fixed registry.
#[derive(Debug)]
pub struct MetadataBuilder {
    metadata: RuntimeMetadata,
}

impl MetadataBuilder {
    pub fn add_call(
        &mut self,
        pallet: &str,
        pallet_index: u8,
        name: &str,
        call_index: u8,
        args: Vec<FieldSpec>,
    ) -> &mut Self {
        let entry = CallEntry {
            pallet: pallet.to_string(),
            name: name.to_string(),
            index: CallIndex::new(pallet_index, call_index),
            args,
        };
        self.metadata
            .calls
            .insert((pallet.to_string(), name.to_string()), entry);
        self
    }

    pub fn add_event(
        &mut self,
        pallet: &str,
        pallet_index: u8,
        name: &str,
        event_index: u8,
        fields: Vec<FieldSpec>,
    ) -> &mut Self {
        let entry = EventEntry {
            pallet: pallet.to_string(),
            name: name.to_string(),
            fields,
        };
        self.metadata
            .events
            .insert([pallet_index, event_index], entry);
        self
    }

    pub fn build(self) -> RuntimeMetadata {
        self.metadata
    }
}
