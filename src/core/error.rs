//! Failure types shared by the block sources and the batch fetcher.

use thiserror::Error;

/// A single fetch against an external data source failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request for block {block} failed: {source}")]
    Http {
        block: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("RPC call for block {block} failed: {source}")]
    Rpc {
        block: u64,
        #[source]
        source: alloy::transports::TransportError,
    },

    #[error("Data source rejected block {block}: {message}")]
    Rejected { block: u64, message: String },

    #[error("Malformed response for block {block}: {reason}")]
    Malformed { block: u64, reason: String },

    #[error("Block {0} not found")]
    NotFound(u64),

    #[error("Fetching block {block} timed out after {seconds}s")]
    Timeout { block: u64, seconds: u64 },
}

impl FetchError {
    /// Block number the failed request was issued for.
    pub fn block(&self) -> u64 {
        match self {
            FetchError::Http { block, .. }
            | FetchError::Rpc { block, .. }
            | FetchError::Rejected { block, .. }
            | FetchError::Malformed { block, .. }
            | FetchError::Timeout { block, .. } => *block,
            FetchError::NotFound(block) => *block,
        }
    }
}

/// A batch could not be completed; none of its results may be committed.
#[derive(Error, Debug)]
#[error(
    "Batch {first}..={last} failed ({failed} of {size} fetches): first failure at block {block}"
)]
pub struct BatchError {
    pub first: u64,
    pub last: u64,
    pub size: usize,
    pub failed: usize,
    /// First failing block in request order.
    pub block: u64,
    #[source]
    pub source: FetchError,
}
