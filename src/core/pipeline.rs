use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::{
    appender::LineAppender,
    batch::fetch_batch,
    planner::Batch,
    source::BlockSource,
    types::Record,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    pub batches: usize,
    pub lines: usize,
    pub elapsed: Duration,
}

/// Fetch-then-append loop over a sequence of batches.
///
/// Batches run strictly one after another: the next batch is only fetched
/// once every line of the previous one has been appended. A failing batch
/// stops the run before anything of it is written.
pub struct Pipeline<'a, S: ?Sized> {
    source: &'a S,
    appender: LineAppender,
}

impl<'a, S> Pipeline<'a, S>
where
    S: BlockSource + ?Sized,
    S::Record: Record,
{
    pub fn new(source: &'a S, appender: LineAppender) -> Self {
        Self { source, appender }
    }

    pub fn appender(&self) -> &LineAppender {
        &self.appender
    }

    pub async fn run<I>(&self, batches: I) -> Result<PipelineSummary>
    where
        I: IntoIterator<Item = Batch>,
    {
        let started = Instant::now();
        let mut summary = PipelineSummary::default();

        for batch in batches {
            let Some(first) = batch.first() else {
                continue;
            };
            info!("🔄 Processing block #{}", first);

            let records = fetch_batch(self.source, &batch)
                .await
                .with_context(|| format!("Failed to fetch batch starting at block {first}"))?;

            summary.lines += self.appender.append_all(&records).await?;
            summary.batches += 1;
        }

        summary.elapsed = started.elapsed();
        Ok(summary)
    }
}
