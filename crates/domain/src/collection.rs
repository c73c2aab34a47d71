//! Named groups of saved requests.

use serde::{Deserialize, Serialize};

use crate::request::SavedRequest;
use crate::serde_ext;
use crate::user::UserId;

/// A user-defined collection as returned by the persistence service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Identifier assigned by the store.
    #[serde(deserialize_with = "serde_ext::string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Saved requests in the order they were added.
    #[serde(default)]
    pub requests: Vec<SavedRequest>,
}

/// Payload for creating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollection {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owner.
    pub user_id: UserId,
}
