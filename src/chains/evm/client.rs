use alloy::{
    providers::{Provider, ProviderBuilder, RootProvider},
    transports::http::{Client, Http},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::core::{error::FetchError, source::BlockSource, types::BlockHash};

/// JSON-RPC client reading block headers from an Ethereum node.
pub struct EvmClient {
    provider: RootProvider<Http<Client>>,
    call_timeout: Option<Duration>,
}

impl EvmClient {
    pub fn new(rpc_url: &str, call_timeout: Option<Duration>) -> Result<Self> {
        let url = rpc_url
            .parse::<reqwest::Url>()
            .with_context(|| format!("Invalid RPC url: {rpc_url}"))?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self {
            provider,
            call_timeout,
        })
    }

    pub async fn get_block_hash(&self, block_number: u64) -> Result<BlockHash, FetchError> {
        debug!("🖨️ Fetching block header for block {}", block_number);
        let request = self.provider.get_block_by_number(block_number.into(), false);

        let response = match self.call_timeout {
            Some(limit) => timeout(limit, request)
                .await
                .map_err(|_| FetchError::Timeout {
                    block: block_number,
                    seconds: limit.as_secs(),
                })?,
            None => request.await,
        };

        let block = response
            .map_err(|source| FetchError::Rpc {
                block: block_number,
                source,
            })?
            .ok_or(FetchError::NotFound(block_number))?;

        Ok(BlockHash(format!("{:?}", block.header.hash)))
    }
}

#[async_trait]
impl BlockSource for EvmClient {
    type Record = BlockHash;

    fn name(&self) -> &str {
        "rpc"
    }

    async fn fetch(&self, block_number: u64) -> Result<BlockHash, FetchError> {
        self.get_block_hash(block_number).await
    }
}
