use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::debug;

use crate::core::types::Record;

/// Appends records to a newline-delimited output file.
///
/// The file is opened and closed for every line, so everything written
/// before a later failure is already on disk. Nothing is ever truncated.
#[derive(Debug, Clone)]
pub struct LineAppender {
    path: PathBuf,
}

impl LineAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append<R: Record>(&self, record: &R) -> Result<()> {
        let mut line = record.to_line()?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open output file {}", self.path.display()))?;

        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        Ok(())
    }

    /// Append every record in order; returns the number of lines written.
    pub async fn append_all<R: Record>(&self, records: &[R]) -> Result<usize> {
        for record in records {
            self.append(record).await?;
        }
        debug!(
            path = %self.path.display(),
            lines = records.len(),
            "⏏️ Appended records"
        );
        Ok(records.len())
    }
}
