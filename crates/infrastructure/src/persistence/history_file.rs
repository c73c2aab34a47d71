//! History export files.
//!
//! Exports go to `api-history-YYYY-MM-DD.json` in a chosen directory.
//! Imports read any file and validate it completely before returning.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use courier_application::{ImportFormatError, export_file_name, export_history, import_history};
use courier_domain::HistoryItem;
use tokio::fs;
use tracing::info;

/// Error type for history file operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryFileError {
    /// IO error during file operations.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// History could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file is not a valid history export.
    #[error(transparent)]
    Format(#[from] ImportFormatError),
}

/// Reads and writes history export files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryFile;

impl HistoryFile {
    /// Creates a new history file handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Path of an export written into `dir` at `now`.
    #[must_use]
    pub fn export_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
        dir.join(export_file_name(now))
    }

    /// Writes `items` to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if serialization or any file operation fails.
    pub async fn write(&self, path: &Path, items: &[HistoryItem]) -> Result<(), HistoryFileError> {
        let content = export_history(items)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(parent, source))?;
        }
        fs::write(path, content)
            .await
            .map_err(|source| io_error(path, source))?;

        info!(path = %path.display(), count = items.len(), "history exported");
        Ok(())
    }

    /// Reads and validates the export at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a history
    /// export.
    pub async fn read(&self, path: &Path) -> Result<Vec<HistoryItem>, HistoryFileError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| io_error(path, source))?;
        Ok(import_history(&content)?)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> HistoryFileError {
    HistoryFileError::Io {
        path: path.to_path_buf(),
        source,
    }
}
