//! Collection store port

use async_trait::async_trait;
use courier_domain::{Collection, NewCollection, SavedRequest, UserId};

use crate::error::PersistenceError;

/// Repository trait for collections of saved requests.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Lists the collections of a user.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the store cannot be read.
    async fn list(&self, user: &UserId) -> Result<Vec<Collection>, PersistenceError>;

    /// Creates an empty collection.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the store rejects the collection.
    async fn create(&self, collection: &NewCollection) -> Result<(), PersistenceError>;

    /// Appends a request to an existing collection.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if the store rejects the request.
    async fn add_request(
        &self,
        collection_id: &str,
        request: &SavedRequest,
    ) -> Result<(), PersistenceError>;
}
