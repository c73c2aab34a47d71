//! Collections: list, create and save the current draft.

use std::sync::Arc;

use courier_domain::{
    Collection, EntryList, FieldMap, NewCollection, RequestDraft, SavedRequest, UserId,
};
use tracing::{debug, info};
use url::Url;

use crate::error::{CollectionError, PersistenceError, ValidationError};
use crate::ports::CollectionStore;

/// Use case for managing collections of saved requests.
pub struct CollectionService<C> {
    store: Arc<C>,
}

impl<C: CollectionStore> CollectionService<C> {
    /// Creates a new `CollectionService`.
    #[must_use]
    pub const fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Lists the collections of `user`.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError`.
    pub async fn list(&self, user: &UserId) -> Result<Vec<Collection>, PersistenceError> {
        let collections = self.store.list(user).await?;
        debug!(user = %user, count = collections.len(), "collections loaded");
        Ok(collections)
    }

    /// Creates an empty collection named `name`.
    ///
    /// # Errors
    /// - `MissingCollectionName` if the trimmed name is empty
    /// - The store's `PersistenceError`
    pub async fn create(&self, name: &str, user: &UserId) -> Result<(), CollectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingCollectionName.into());
        }

        let collection = NewCollection {
            name: name.to_string(),
            description: String::new(),
            user_id: user.clone(),
        };
        self.store.create(&collection).await?;
        info!(name, "collection created");
        Ok(())
    }

    /// Saves the draft, unresolved, into a collection.
    ///
    /// # Errors
    /// - `InvalidJsonBody` if the body text is not JSON
    /// - The store's `PersistenceError`
    pub async fn save_request(
        &self,
        collection_id: &str,
        draft: &RequestDraft,
    ) -> Result<SavedRequest, CollectionError> {
        let request = saved_request_from_draft(draft)?;
        self.store.add_request(collection_id, &request).await?;
        info!(collection_id, name = %request.name, "request saved to collection");
        Ok(request)
    }
}

/// Captures a draft as a collection entry.
///
/// Placeholders stay unresolved. Only enabled entries with a non-blank key
/// are kept. Unlike sending, the body is parsed for every method.
///
/// # Errors
/// Returns `InvalidJsonBody` if the body text is not JSON.
pub fn saved_request_from_draft(draft: &RequestDraft) -> Result<SavedRequest, ValidationError> {
    let body = if draft.body.is_empty() {
        None
    } else {
        Some(serde_json::from_str(&draft.body).map_err(|_| ValidationError::InvalidJsonBody)?)
    };

    Ok(SavedRequest {
        url: draft.url.clone(),
        method: draft.method,
        headers: raw_fields(&draft.headers),
        params: raw_fields(&draft.params),
        body,
        name: request_name(draft),
    })
}

fn raw_fields(entries: &EntryList) -> FieldMap {
    entries
        .active()
        .map(|entry| (entry.key.clone(), entry.value.clone()))
        .collect()
}

/// `GET /posts/1`; falls back to the raw URL when it does not parse, as is
/// the case for templated URLs such as `{{baseUrl}}/posts`.
fn request_name(draft: &RequestDraft) -> String {
    match Url::parse(&draft.url) {
        Ok(url) => format!("{} {}", draft.method, url.path()),
        Err(_) => format!("{} {}", draft.method, draft.url),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemoryCollections;
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_saved_request_keeps_templates() {
        let mut draft = RequestDraft::new(HttpMethod::Get, "https://api.example.com/posts/1?x=1");
        draft.headers.add_with("Authorization", "Bearer {{token}}");
        let disabled = draft.headers.add_with("X-Off", "1");
        draft.headers.toggle(disabled).unwrap();
        draft.body = "{\"a\": 1}".to_string();

        let saved = saved_request_from_draft(&draft).unwrap();

        assert_eq!(saved.name, "GET /posts/1");
        assert_eq!(saved.headers.len(), 1);
        assert_eq!(saved.headers["Authorization"], "Bearer {{token}}");
        assert_eq!(saved.body, Some(json!({"a": 1})));
    }

    #[test]
    fn test_templated_url_name_falls_back() {
        let draft = RequestDraft::new(HttpMethod::Delete, "{{baseUrl}}/users/2");
        let saved = saved_request_from_draft(&draft).unwrap();
        assert_eq!(saved.name, "DELETE {{baseUrl}}/users/2");
        assert_eq!(saved.body, None);
    }

    #[test]
    fn test_invalid_body_is_rejected() {
        let mut draft = RequestDraft::new(HttpMethod::Get, "https://a.example");
        draft.body = "{".to_string();
        assert_eq!(
            saved_request_from_draft(&draft),
            Err(ValidationError::InvalidJsonBody)
        );
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let store = Arc::new(MemoryCollections::default());
        let service = CollectionService::new(Arc::clone(&store));

        let err = service.create("   ", &UserId::anonymous()).await.unwrap_err();

        assert_eq!(
            err,
            CollectionError::Validation(ValidationError::MissingCollectionName)
        );
        assert!(store.collections.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_save_request() {
        let store = Arc::new(MemoryCollections::default());
        let service = CollectionService::new(Arc::clone(&store));
        let user = UserId::new("u1");

        service.create("  Users API ", &user).await.unwrap();
        let collections = service.list(&user).await.unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].name, "Users API");
        assert_eq!(collections[0].description, "");

        let draft = RequestDraft::default();
        service.save_request(&collections[0].id, &draft).await.unwrap();

        let collections = service.list(&user).await.unwrap();
        assert_eq!(collections[0].requests.len(), 1);
        assert_eq!(collections[0].requests[0].name, "GET /posts/1");
        assert!(service.list(&UserId::anonymous()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let service = CollectionService::new(Arc::new(MemoryCollections::failing()));
        let err = service.create("x", &UserId::anonymous()).await.unwrap_err();
        assert!(matches!(err, CollectionError::Persistence(_)));
    }
}
