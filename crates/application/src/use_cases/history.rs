//! History listing, clearing, export and import.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use courier_domain::{HistoryItem, UserId};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::error::{ImportFormatError, PersistenceError};
use crate::ports::HistoryStore;

/// Use case for reading and clearing the stored history.
pub struct HistoryService<H> {
    store: Arc<H>,
}

impl<H: HistoryStore> HistoryService<H> {
    /// Creates a new `HistoryService`.
    #[must_use]
    pub const fn new(store: Arc<H>) -> Self {
        Self { store }
    }

    /// Lists the history of `user`.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError`.
    pub async fn list(&self, user: &UserId) -> Result<Vec<HistoryItem>, PersistenceError> {
        let items = self.store.list(user).await?;
        debug!(user = %user, count = items.len(), "history loaded");
        Ok(items)
    }

    /// Deletes all history.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError`.
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.store.clear().await?;
        info!("history cleared");
        Ok(())
    }
}

/// Serializes history as a JSON array with 2-space indentation and a
/// trailing newline.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_history(items: &[HistoryItem]) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    items.serialize(&mut serializer)?;

    let mut json = String::from_utf8_lossy(&buffer).into_owned();
    json.push('\n');
    Ok(json)
}

/// Parses an exported history file.
///
/// The whole file is validated before anything is returned, so a caller
/// can replace its state only on success.
///
/// # Errors
/// - `InvalidJson` if the text is not JSON
/// - `NotAnArray` if the top-level value is not an array
/// - `InvalidItem` for the first element that is not a history item
pub fn import_history(text: &str) -> Result<Vec<HistoryItem>, ImportFormatError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportFormatError::InvalidJson(e.to_string()))?;

    let Value::Array(elements) = value else {
        return Err(ImportFormatError::NotAnArray);
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).map_err(|e| ImportFormatError::InvalidItem {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// File name for an export made at `now`, e.g. `api-history-2026-10-16.json`.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("api-history-{}.json", now.format("%Y-%m-%d"))
}
