// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::address::{AddressCodec, Ss58AddressCodec};
use crate::blocks::{BlockResponse, Reconstructor, empty_block};
use crate::codec::{AccountInfo, Call, Codec, CodecConfig, MultiAddress};
use crate::error::{ClientError, LookupError, ResultExt};
use crate::metadata::{
    Freshness, FrameMetadataDecoder, MetadataCache, MetadataDecoder, RuntimeMetadata,
};
use crate::sr25519::Keypair;
use crate::transaction::{self, CallArg, CallBuilder, ChainContext, TxOptions, sign_call};
use crate::transport::{RpcTransport, Transport};
use crate::utils::hash::{system_account_key, system_events_key, to_hex};
use config::{ChainConfig, ClientConfig};
use sp_core::H256;
use std::sync::Arc;

/// Read and write access to one chain.
///
/// Operations that may refresh metadata take `&mut self`; share a client
/// behind a lock to use it from several tasks.
pub struct Client<T: Transport> {
    transport: T,
    cache: MetadataCache,
    decoder: Box<dyn MetadataDecoder>,
    addresses: Box<dyn AddressCodec>,
    chain: ChainConfig,
    codec: Codec,
    genesis_hash: Option<H256>,
}

impl Client<RpcTransport> {
    /// Connects to the node named in `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = RpcTransport::connect(&config.substrate.url)
            .await
            .context("connect")?;
        Ok(Self::new(transport, config.chain.clone()))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, chain: ChainConfig) -> Self {
        Self {
            transport,
            cache: MetadataCache::new(),
            decoder: Box::new(FrameMetadataDecoder),
            addresses: Box::new(Ss58AddressCodec::new()),
            codec: Codec::new(CodecConfig::for_chain(&chain, "")),
            chain,
            genesis_hash: None,
        }
    }

    pub fn with_decoder(mut self, decoder: impl MetadataDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_address_codec(mut self, addresses: impl AddressCodec + 'static) -> Self {
        self.addresses = Box::new(addresses);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain
    }

    /// Reloads metadata if the runtime was upgraded since the last call.
    pub async fn ensure_fresh(&mut self) -> Result<Freshness, ClientError> {
        let freshness = self
            .cache
            .ensure_fresh(&mut self.transport, self.decoder.as_ref())
            .await?;

        if let Freshness::Refreshed { .. } = freshness
            && let Some(version) = self.cache.version()
        {
            let config = CodecConfig::for_chain(&self.chain, &version.spec_name);
            tracing::debug!(
                spec_name = %version.spec_name,
                account_layout = ?config.account_layout,
                "Codec configured for runtime"
            );
            self.codec = Codec::new(config);
        }
        Ok(freshness)
    }

    /// Metadata of the last observed runtime.
    pub fn metadata(&self) -> Result<Arc<RuntimeMetadata>, ClientError> {
        self.cache
            .metadata()
            .ok_or(LookupError::MetadataNotLoaded)
            .context("read metadata")
    }

    /// Hash of block 0. Fetched once, then served from memory.
    pub async fn genesis_hash(&mut self) -> Result<H256, ClientError> {
        if let Some(hash) = self.genesis_hash {
            return Ok(hash);
        }
        let hash = self
            .transport
            .block_hash(0)
            .await
            .context("fetch genesis hash")?
            .ok_or_else(|| LookupError::BlockNotFound("0".to_string()))
            .context("fetch genesis hash")?;
        self.genesis_hash = Some(hash);
        Ok(hash)
    }

    pub async fn get_block_by_number(&mut self, height: u64) -> Result<BlockResponse, ClientError> {
        let hash = self
            .transport
            .block_hash(height)
            .await
            .context("resolve block")?
            .ok_or_else(|| LookupError::BlockNotFound(height.to_string()))
            .context("resolve block")?;
        self.get_block_by_hash(hash).await
    }

    /// Transfers contained in the block with `hash`.
    pub async fn get_block_by_hash(&mut self, hash: H256) -> Result<BlockResponse, ClientError> {
        let block = self
            .transport
            .block(hash)
            .await
            .context("fetch block")?
            .ok_or_else(|| LookupError::BlockNotFound(to_hex(hash.as_bytes())))
            .context("fetch block")?;

        if block.extrinsics.is_empty() {
            return Ok(empty_block(&block));
        }

        self.ensure_fresh().await?;
        let metadata = self.metadata()?;

        let events = self
            .transport
            .storage(&system_events_key(), Some(hash))
            .await
            .context("fetch events")?;

        Reconstructor::new(
            &self.codec,
            &metadata,
            self.addresses.as_ref(),
            self.chain.ss58_prefix,
        )
        .reconstruct(&self.transport, &block, events.as_deref())
        .await
    }

    /// `System.Account` of `address` at the best block. Unknown accounts read as zero.
    pub async fn account_info(&mut self, address: &str) -> Result<AccountInfo, ClientError> {
        let account = self.addresses.decode(address).context("account info")?;
        self.account_info_by_id(&account).await
    }

    pub async fn account_info_by_id(
        &mut self,
        account: &[u8; 32],
    ) -> Result<AccountInfo, ClientError> {
        self.ensure_fresh().await?;
        self.read_account_info(account).await
    }

    /// `System.Account` read with the codec of the last observed runtime.
    async fn read_account_info(&self, account: &[u8; 32]) -> Result<AccountInfo, ClientError> {
        let raw = self
            .transport
            .storage(&system_account_key(account), None)
            .await
            .context("account info")?;

        match raw {
            Some(bytes) => self
                .codec
                .decode_account_info(&bytes)
                .context("account info"),
            None => Ok(AccountInfo::default()),
        }
    }

    pub async fn next_nonce(&mut self, account: &[u8; 32]) -> Result<u64, ClientError> {
        Ok(self.account_info_by_id(account).await?.nonce.into())
    }

    /// Encodes `"Pallet.call"` against the current runtime.
    pub async fn build_call(&mut self, name: &str, args: &[CallArg]) -> Result<Call, ClientError> {
        self.ensure_fresh().await?;
        self.encode_call(name, args)
    }

    fn encode_call(&self, name: &str, args: &[CallArg]) -> Result<Call, ClientError> {
        let metadata = self.metadata()?;
        CallBuilder::new(&metadata, &self.codec).build(name, args)
    }

    /// Signs `call` with `keys` and submits it once.
    pub async fn sign_and_submit(
        &mut self,
        keys: &Keypair,
        call: Call,
        options: TxOptions,
    ) -> Result<H256, ClientError> {
        self.ensure_fresh().await?;
        self.submit_signed(keys, call, options).await
    }

    /// Signing and submission against the already refreshed runtime.
    async fn submit_signed(
        &mut self,
        keys: &Keypair,
        call: Call,
        options: TxOptions,
    ) -> Result<H256, ClientError> {
        let genesis_hash = self.genesis_hash().await?;
        let nonce = match options.nonce {
            Some(nonce) => nonce,
            None => self.read_account_info(&keys.public()).await?.nonce.into(),
        };

        let version = self
            .cache
            .version()
            .ok_or(LookupError::MetadataNotLoaded)
            .context("sign transaction")?;
        let chain = ChainContext {
            spec_version: version.spec_version,
            transaction_version: version.transaction_version,
            genesis_hash,
        };

        let extrinsic = sign_call(keys, call, &chain, nonce, &options)?;
        tracing::debug!(
            nonce,
            tip = options.tip,
            spec_version = chain.spec_version,
            "Signed extrinsic"
        );
        transaction::submit(&self.transport, &extrinsic).await
    }

    /// Sends `amount` to `dest` through the configured transfer call.
    pub async fn transfer(
        &mut self,
        keys: &Keypair,
        dest: &str,
        amount: u128,
        tip: u128,
    ) -> Result<H256, ClientError> {
        let dest = self.addresses.decode(dest).context("transfer")?;
        self.ensure_fresh().await?;
        let call = self.encode_call(
            &self.chain.transfer_call,
            &[
                CallArg::Address(MultiAddress::AccountId32(dest)),
                CallArg::UInt(amount),
            ],
        )?;
        let options = TxOptions {
            tip,
            ..Default::default()
        };
        self.submit_signed(keys, call, options).await
    }
}
