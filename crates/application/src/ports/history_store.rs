//! History store port

use async_trait::async_trait;
use courier_domain::{HistoryItem, RequestDescriptor, UserId};

use crate::error::PersistenceError;

/// Repository trait for request history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Lists the history of a user, in the order the store returns it.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the store cannot be read.
    async fn list(&self, user: &UserId) -> Result<Vec<HistoryItem>, PersistenceError>;

    /// Records one executed request.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the entry cannot be written.
    async fn append(
        &self,
        request: &RequestDescriptor,
        user: &UserId,
    ) -> Result<(), PersistenceError>;

    /// Deletes all history. Clearing an empty history succeeds.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the store rejects the call.
    async fn clear(&self) -> Result<(), PersistenceError>;
}
