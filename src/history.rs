//! Local Markdown history — newest digest first.
//!
//! Single-writer file: no locking. Kept as the fallback copy for manual
//! import when the document update does not go through.

use std::path::{Path, PathBuf};

use crate::constants::HISTORY_HEADER;
use crate::error::DigestResult;

#[derive(Debug, Clone)]
pub struct HistorySink {
    path: PathBuf,
}

impl HistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Put `markdown` ahead of the existing content, or create the file with
    /// the history header.
    pub fn prepend(&self, markdown: &str) -> DigestResult<()> {
        let content = if self.path.exists() {
            let existing = std::fs::read_to_string(&self.path)?;
            format!("{}{}", markdown, existing)
        } else {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            format!("{}{}", HISTORY_HEADER, markdown)
        };
        std::fs::write(&self.path, content)?;
        tracing::info!(path = %self.path.display(), "History file updated");
        Ok(())
    }

    /// Best-effort variant: failures are logged, never returned.
    pub fn prepend_logged(&self, markdown: &str) -> bool {
        match self.prepend(markdown) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to update history file");
                false
            }
        }
    }
}
