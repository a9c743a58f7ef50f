use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::{
    appender::LineAppender, batch::fetch_batch, planner::HashRange, source::BlockSource,
    types::BlockHash,
};

/// Fetch the hashes of the blocks preceding `range.block_number()` in a
/// single batch, log them, then append them to `output`, most recent first.
pub async fn collect_last_hashes<S>(
    source: &S,
    range: HashRange,
    output: &Path,
) -> Result<Vec<BlockHash>>
where
    S: BlockSource<Record = BlockHash> + ?Sized,
{
    info!(
        begin_block = range.block_number(),
        number = range.count(),
        output = %output.display(),
        "🚀 Collecting last block hashes"
    );

    let hashes = fetch_batch(source, &range.batch())
        .await
        .with_context(|| {
            format!(
                "Failed to collect {} hashes before block {}",
                range.count(),
                range.block_number()
            )
        })?;

    let listing: Vec<&str> = hashes.iter().map(BlockHash::as_str).collect();
    info!("📜 Collected hashes: {:?}", listing);

    LineAppender::new(output).append_all(&hashes).await?;
    Ok(hashes)
}
