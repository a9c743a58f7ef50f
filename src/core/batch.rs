use futures::future::join_all;
use tracing::{debug, error};

use crate::core::{
    error::{BatchError, FetchError},
    planner::Batch,
    source::BlockSource,
};

/// All-or-nothing outcome of a batch: every record in request order, or the
/// cause of the failure.
pub type BatchResult<T> = Result<Vec<T>, BatchError>;

/// Fetch every block of `batch` concurrently and wait for all of them.
///
/// The fetches are polled together on the current task. Each one runs to
/// completion even when another has already failed, and records are returned
/// in the batch order regardless of which call finished first.
pub async fn fetch_batch<S>(source: &S, batch: &Batch) -> BatchResult<S::Record>
where
    S: BlockSource + ?Sized,
{
    debug!(
        source = source.name(),
        size = batch.len(),
        "Issuing batch fetches"
    );

    let outcomes = join_all(batch.blocks().iter().map(|&block| source.fetch(block))).await;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut first_failure: Option<FetchError> = None;
    let mut failed = 0;

    for (block, outcome) in batch.blocks().iter().zip(outcomes) {
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                error!(source = source.name(), block, "❌ Fetch failed: {}", e);
                failed += 1;
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        None => Ok(records),
        Some(cause) => Err(BatchError {
            first: batch.first().unwrap_or_default(),
            last: batch.last().unwrap_or_default(),
            size: batch.len(),
            failed,
            block: cause.block(),
            source: cause,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MockSource;
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_follow_request_order() {
        // Earlier blocks answer last
        let source = MockSource::new().with_delay(|block| Duration::from_millis(60 - block * 10));
        let batch = Batch::new(vec![1, 2, 3, 4, 5]);

        let records = fetch_batch(&source, &batch).await.expect("batch should succeed");

        let lines: Vec<&str> = records.iter().map(|r| r.as_str()).collect();
        assert_eq!(lines, vec!["block-1", "block-2", "block-3", "block-4", "block-5"]);
        assert_eq!(source.completion_order(), vec![5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_batch() {
        let source = MockSource::new().failing_on([13]);
        let batch = Batch::new(vec![10, 11, 12, 13, 14]);

        let err = fetch_batch(&source, &batch)
            .await
            .expect_err("batch should fail");

        assert_eq!(err.block, 13);
        assert_eq!(err.failed, 1);
        assert_eq!((err.first, err.last, err.size), (10, 14, 5));
        assert!(matches!(err.source, FetchError::Rejected { block: 13, .. }));
    }

    #[tokio::test]
    async fn test_failed_batch_still_awaits_every_fetch() {
        let source = MockSource::new()
            .failing_on([20, 22])
            .with_delay(|block| Duration::from_millis((block - 19) * 10));
        let batch = Batch::new(vec![20, 21, 22, 23]);

        let err = fetch_batch(&source, &batch)
            .await
            .expect_err("batch should fail");

        assert_eq!(err.block, 20, "first failure in request order is reported");
        assert_eq!(err.failed, 2);
        assert_eq!(source.completion_order().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let source = MockSource::new();
        let records = fetch_batch(&source, &Batch::new(vec![]))
            .await
            .expect("empty batch should succeed");
        assert!(records.is_empty());
    }
}
