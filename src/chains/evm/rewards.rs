use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::core::{
    appender::LineAppender,
    pipeline::{Pipeline, PipelineSummary},
    planner::RewardRange,
    source::BlockSource,
    types::RewardRecord,
};

/// Download the reward record of every block in `range` into `output`,
/// one JSON object per line, ascending.
pub async fn download_block_rewards<S>(
    source: &S,
    range: RewardRange,
    output: &Path,
) -> Result<PipelineSummary>
where
    S: BlockSource<Record = RewardRecord> + ?Sized,
{
    info!(
        from = range.from(),
        to = range.to(),
        batch_size = range.stride(),
        output = %output.display(),
        "🚀 Downloading block rewards"
    );
    if range.last_fetched() > range.to() {
        info!(
            "Final batch runs past block {} up to block {}",
            range.to(),
            range.last_fetched()
        );
    }

    let pipeline = Pipeline::new(source, LineAppender::new(output));
    let summary = pipeline.run(range.batches()).await?;

    info!("📊 Reward download finished:");
    info!("  └─ Batches: {}", summary.batches);
    info!("  └─ Records: {}", summary.lines);
    info!("  └─ Elapsed: {:?}", summary.elapsed);

    Ok(summary)
}
