//! Append-only log of conversation summaries

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use crate::Result;

const ENTRY_SEPARATOR_WIDTH: usize = 30;

pub struct SummaryLog {
    path: PathBuf,
    /// Serializes appends so entries never interleave
    write_lock: Mutex<()>,
}

impl SummaryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_entry(timestamp: &str, summary: &str) -> String {
        format!(
            "[{timestamp}]\n{summary}\n{}\n",
            "=".repeat(ENTRY_SEPARATOR_WIDTH)
        )
    }

    /// Append a timestamped entry, creating the file if needed
    pub async fn append(&self, summary: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let entry = Self::format_entry(&timestamp, summary);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;

        info!("Conversation summary saved to {}", self.path.display());
        Ok(())
    }
}
