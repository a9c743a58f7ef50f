use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::core::{error::FetchError, source::BlockSource, types::BlockHash};

type DelayFn = Arc<dyn Fn(u64) -> Duration + Send + Sync>;

/// In-memory source answering `block-<n>` for every block.
#[derive(Clone)]
pub struct MockSource {
    failing: HashSet<u64>,
    delay: Option<DelayFn>,
    completed: Arc<Mutex<Vec<u64>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            delay: None,
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(mut self, blocks: impl IntoIterator<Item = u64>) -> Self {
        self.failing.extend(blocks);
        self
    }

    pub fn with_delay(mut self, delay: impl Fn(u64) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Arc::new(delay));
        self
    }

    /// Blocks in the order their fetch finished.
    pub fn completion_order(&self) -> Vec<u64> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockSource for MockSource {
    type Record = BlockHash;

    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, block_number: u64) -> Result<BlockHash, FetchError> {
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(block_number)).await;
        }
        self.completed.lock().unwrap().push(block_number);

        if self.failing.contains(&block_number) {
            return Err(FetchError::Rejected {
                block: block_number,
                message: "mock failure".to_string(),
            });
        }
        Ok(BlockHash(format!("block-{block_number}")))
    }
}
