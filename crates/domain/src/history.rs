//! Request History Domain Model
//!
//! One immutable record per executed request, as stored by the persistence
//! service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestDescriptor;
use crate::serde_ext;
use crate::user::UserId;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Identifier assigned by the store.
    #[serde(deserialize_with = "serde_ext::string_or_number")]
    pub id: String,
    /// When the request was recorded.
    #[serde(deserialize_with = "serde_ext::lenient_datetime")]
    pub created_at: DateTime<Utc>,
    /// Owner of the entry.
    pub user_id: UserId,
    /// The request that was sent.
    #[serde(flatten)]
    pub request: RequestDescriptor,
}

impl HistoryItem {
    /// Creates a history item for a request sent now.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        user_id: UserId,
        request: RequestDescriptor,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            user_id,
            request,
        }
    }

    /// Returns a human-readable "time ago" string relative to `now`.
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d ago", duration.num_days())
        } else {
            self.created_at.format("%Y-%m-%d").to_string()
        }
    }
}
