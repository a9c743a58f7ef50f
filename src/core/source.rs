use async_trait::async_trait;

use crate::core::error::FetchError;

/// External data source answering one request per block number.
#[async_trait]
pub trait BlockSource: Send + Sync {
    type Record: Send;

    /// Short name used in logs (e.g. "etherscan", "rpc")
    fn name(&self) -> &str;

    async fn fetch(&self, block_number: u64) -> Result<Self::Record, FetchError>;
}
