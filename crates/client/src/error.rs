// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fault taxonomy shared by every layer of the client.
//!
//! Lower layers return the narrow error for their concern. Public client
//! operations wrap it in [`ClientError`] together with the name of the
//! operation that failed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying connection is gone. The metadata refresh path reconnects
    /// once when it sees this.
    #[error("Connection appears closed: {0}")]
    StaleConnection(String),

    #[error("RPC call '{method}' failed: {message}")]
    Rpc { method: String, message: String },

    #[error("Invalid response to '{method}': {message}")]
    InvalidResponse { method: String, message: String },

    #[error("Failed to connect to '{url}': {message}")]
    Connect { url: String, message: String },
}

impl TransportError {
    pub fn is_stale_connection(&self) -> bool {
        matches!(self, TransportError::StaleConnection(_))
    }

    pub(crate) fn invalid_response(method: &str, message: impl ToString) -> Self {
        TransportError::InvalidResponse {
            method: method.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Unknown {what} discriminant {value}")]
    UnknownDiscriminant { what: &'static str, value: u8 },

    #[error("Declared length {len} exceeds ceiling {max}")]
    LengthTooLarge { len: u64, max: usize },

    #[error("Unsupported extrinsic version {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown type id {0}")]
    UnknownType(u32),

    #[error("Unknown event {pallet}:{event}")]
    UnknownEvent { pallet: u8, event: u8 },

    #[error("{0} trailing bytes after decoding")]
    TrailingBytes(usize),

    #[error("Block contains {0} timestamp calls, expected at most one")]
    MultipleTimestamps(usize),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),
}

impl From<parity_scale_codec::Error> for DecodeError {
    fn from(err: parity_scale_codec::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Call '{0}' not found in runtime metadata")]
    UnknownCall(String),

    #[error("Metadata has no entry for '{0}'")]
    MissingEntry(String),

    #[error("Metadata has not been loaded")]
    MetadataNotLoaded,

    #[error("Event phase {phase} is out of range for a block with {extrinsics} extrinsics")]
    PhaseOutOfRange { phase: u32, extrinsics: usize },

    #[error("Block has extrinsics but no timestamp call")]
    MissingTimestamp,

    #[error("Transfer event points at unsigned extrinsic {0}")]
    UnsignedTransfer(u32),

    #[error("Block {0} not found")]
    BlockNotFound(String),
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length {0}, expected 32 or 64 bytes")]
    InvalidKeyLength(usize),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Invalid signature bytes: {0}")]
    InvalidSignature(String),

    #[error("Signature verification failed")]
    VerificationFailed,

    #[error("Produced signature did not verify against the signing key")]
    SelfVerificationFailed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Call '{call}' takes {expected} arguments, got {got}")]
    ArityMismatch {
        call: String,
        expected: usize,
        got: usize,
    },

    #[error("Argument {index} of '{call}' does not fit {expected}")]
    ArgumentMismatch {
        call: String,
        index: usize,
        expected: String,
    },

    #[error("Invalid call name '{0}', expected 'Pallet.call'")]
    InvalidCallName(String),

    #[error("Invalid mortality: {0}")]
    InvalidMortality(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Lookup,
    Crypto,
    Validation,
}

/// A fault from any layer, tagged with the operation that raised it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("{context}: {source}")]
    Lookup {
        context: &'static str,
        #[source]
        source: LookupError,
    },

    #[error("{context}: {source}")]
    Crypto {
        context: &'static str,
        #[source]
        source: CryptoError,
    },

    #[error("{context}: {source}")]
    Validation {
        context: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Lookup { .. } => ErrorKind::Lookup,
            ClientError::Crypto { .. } => ErrorKind::Crypto,
            ClientError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn context(&self) -> &'static str {
        match self {
            ClientError::Transport { context, .. }
            | ClientError::Decode { context, .. }
            | ClientError::Lookup { context, .. }
            | ClientError::Crypto { context, .. }
            | ClientError::Validation { context, .. } => context,
        }
    }

    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            ClientError::Transport { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            ClientError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn as_lookup(&self) -> Option<&LookupError> {
        match self {
            ClientError::Lookup { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ClientError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Tags a layer error with the operation it occurred in.
pub trait WithContext {
    fn with_context(self, context: &'static str) -> ClientError;
}

macro_rules! impl_with_context {
    ($($err:ty => $variant:ident),* $(,)?) => {
        $(
            impl WithContext for $err {
                fn with_context(self, context: &'static str) -> ClientError {
                    ClientError::$variant { context, source: self }
                }
            }
        )*
    };
}

impl_with_context! {
    TransportError => Transport,
    DecodeError => Decode,
    LookupError => Lookup,
    CryptoError => Crypto,
    ValidationError => Validation,
}

pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ClientError>;
}

impl<T, E: WithContext> ResultExt<T> for Result<T, E> {
    fn context(self, context: &'static str) -> Result<T, ClientError> {
        self.map_err(|e| e.with_context(context))
    }
}
