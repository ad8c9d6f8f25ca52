// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{MetadataDecoder, RuntimeMetadata};
use crate::error::{ClientError, ResultExt, TransportError};
use crate::transport::{RuntimeVersion, Transport};
use std::sync::Arc;

/// Runtime version together with the metadata decoded for it.
#[derive(Debug, Clone)]
pub struct CachedRuntime {
    pub version: RuntimeVersion,
    pub metadata: Arc<RuntimeMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The cached spec version is still current.
    Current,
    /// Metadata was fetched for a new spec version.
    Refreshed { previous: Option<u32>, current: u32 },
}

/// Holds the metadata for the latest observed runtime.
///
/// Refreshing needs `&mut self`, so callers sharing a client must serialise
/// access themselves.
#[derive(Debug, Default)]
pub struct MetadataCache {
    current: Option<CachedRuntime>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runtime(&self) -> Option<&CachedRuntime> {
        self.current.as_ref()
    }

    pub fn metadata(&self) -> Option<Arc<RuntimeMetadata>> {
        self.current.as_ref().map(|c| c.metadata.clone())
    }

    pub fn version(&self) -> Option<&RuntimeVersion> {
        self.current.as_ref().map(|c| &c.version)
    }

    pub fn spec_version(&self) -> Option<u32> {
        self.version().map(|v| v.spec_version)
    }

    /// Fetches the runtime version and reloads metadata if the spec version changed.
    ///
    /// A stale connection is reconnected once and the version request retried
    /// once. The metadata is replaced only after the new table decodes.
    pub async fn ensure_fresh<T: Transport>(
        &mut self,
        transport: &mut T,
        decoder: &dyn MetadataDecoder,
    ) -> Result<Freshness, ClientError> {
        let version = fetch_version(transport)
            .await
            .context("fetch runtime version")?;

        let previous = self.spec_version();
        if let Some(cached) = self.current.as_mut()
            && previous == Some(version.spec_version)
        {
            tracing::debug!(
                spec_version = version.spec_version,
                "Runtime metadata is current"
            );
            cached.version = version;
            return Ok(Freshness::Current);
        }

        let raw = transport.metadata().await.context("fetch metadata")?;
        let metadata = decoder.decode(&raw).context("decode metadata")?;

        tracing::info!(
            previous = ?previous,
            spec_version = version.spec_version,
            spec_name = %version.spec_name,
            calls = metadata.call_count(),
            events = metadata.event_count(),
            "Loaded runtime metadata"
        );

        let current = version.spec_version;
        self.current = Some(CachedRuntime {
            version,
            metadata: Arc::new(metadata),
        });

        Ok(Freshness::Refreshed { previous, current })
    }
}

async fn fetch_version<T: Transport>(transport: &mut T) -> Result<RuntimeVersion, TransportError> {
    match transport.runtime_version().await {
        Ok(version) => Ok(version),
        Err(err) if err.is_stale_connection() => {
            tracing::warn!(error = %err, "Connection appears closed, reconnecting once");
            transport.reconnect().await?;
            transport.runtime_version().await
        }
        Err(err) => Err(err),
    }
}
