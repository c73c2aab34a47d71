//! Session state
//!
//! One owned struct per user session: the draft being edited, the
//! environment registry, the last response and the cached history and
//! collections. Every operation takes the session by reference; there is
//! no global state.

use std::sync::Arc;

use courier_domain::{
    Collection, DomainResult, EnvironmentRegistry, HistoryItem, RequestDescriptor, RequestDraft,
    ResponseResult, SavedRequest, UserId,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{CollectionError, ImportFormatError, PersistenceError};
use crate::execute_request::ExecuteRequest;
use crate::ports::{CollectionStore, HistoryStore, ProxyClient};
use crate::render::ResponseView;
use crate::use_cases::{CollectionService, HistoryService, export_history, import_history};

/// A single user's workbench.
pub struct Session<P, H, C> {
    executor: ExecuteRequest<P, H>,
    history_service: HistoryService<H>,
    collection_service: CollectionService<C>,
    draft: RequestDraft,
    environments: EnvironmentRegistry,
    user: UserId,
    last_response: Option<ResponseResult>,
    history: Vec<HistoryItem>,
    collections: Vec<Collection>,
    pending_history: Vec<JoinHandle<()>>,
}

impl<P, H, C> Session<P, H, C>
where
    P: ProxyClient + 'static,
    H: HistoryStore + 'static,
    C: CollectionStore,
{
    /// Creates an anonymous session with the default draft.
    pub fn new(
        proxy: Arc<P>,
        history: Arc<H>,
        collections: Arc<C>,
        environments: EnvironmentRegistry,
    ) -> Self {
        Self {
            executor: ExecuteRequest::new(proxy, Arc::clone(&history)),
            history_service: HistoryService::new(history),
            collection_service: CollectionService::new(collections),
            draft: RequestDraft::default(),
            environments,
            user: UserId::anonymous(),
            last_response: None,
            history: Vec::new(),
            collections: Vec::new(),
            pending_history: Vec::new(),
        }
    }

    /// The request being edited.
    pub const fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Mutable access to the request being edited.
    pub const fn draft_mut(&mut self) -> &mut RequestDraft {
        &mut self.draft
    }

    /// The environment registry.
    pub const fn environments(&self) -> &EnvironmentRegistry {
        &self.environments
    }

    /// Mutable access to the environment registry.
    pub const fn environments_mut(&mut self) -> &mut EnvironmentRegistry {
        &mut self.environments
    }

    /// Switches the active environment.
    ///
    /// # Errors
    /// Returns `UnknownEnvironment` and keeps the current one.
    pub fn select_environment(&mut self, id: &str) -> DomainResult<()> {
        self.environments.set_active(id)?;
        info!(environment = id, "environment selected");
        Ok(())
    }

    /// The current user.
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Changes the user; `None` logs out to the anonymous user.
    ///
    /// Cached history and collections belong to the previous user and are
    /// dropped.
    pub fn set_user(&mut self, user: Option<UserId>) {
        self.user = user.unwrap_or_default();
        self.history.clear();
        self.collections.clear();
    }

    /// Result of the most recent send.
    pub const fn last_response(&self) -> Option<&ResponseResult> {
        self.last_response.as_ref()
    }

    /// Display model of the most recent send.
    pub fn response_view(&self) -> Option<ResponseView> {
        self.last_response.as_ref().map(ResponseView::new)
    }

    /// Builds and sends the draft against the active environment.
    ///
    /// Taking `&mut self` means a session never has two sends in flight.
    pub async fn send(&mut self) -> &ResponseResult {
        let execution = self
            .executor
            .send(&self.draft, self.environments.active_variables(), &self.user)
            .await;

        if let Some(handle) = execution.history {
            self.pending_history.retain(|task| !task.is_finished());
            self.pending_history.push(handle);
        }
        self.last_response.insert(execution.response)
    }

    /// Waits for background history appends started by earlier sends, then
    /// reloads the cached history if any were pending.
    ///
    /// A failed reload is logged and leaves the cache as it was.
    pub async fn flush_history(&mut self) {
        if self.wait_for_appends().await {
            // Already logged by load_history.
            let _ = self.load_history().await;
        }
    }

    async fn wait_for_appends(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending_history);
        let any = !pending.is_empty();
        for handle in pending {
            if let Err(err) = handle.await {
                warn!(error = %err, "history task did not complete");
            }
        }
        any
    }

    /// Cached history.
    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    /// Reloads history from the store.
    ///
    /// Pending appends are awaited first so the list includes recent sends.
    /// On failure the cache is kept.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError` after logging it.
    pub async fn refresh_history(&mut self) -> Result<&[HistoryItem], PersistenceError> {
        self.wait_for_appends().await;
        self.load_history().await
    }

    async fn load_history(&mut self) -> Result<&[HistoryItem], PersistenceError> {
        match self.history_service.list(&self.user).await {
            Ok(items) => {
                self.history = items;
                Ok(&self.history)
            }
            Err(err) => {
                warn!(error = %err, "failed to load history");
                Err(err)
            }
        }
    }

    /// Deletes all history and empties the cache.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError`; the cache is kept.
    pub async fn clear_history(&mut self) -> Result<(), PersistenceError> {
        self.wait_for_appends().await;
        if let Err(err) = self.history_service.clear().await {
            warn!(error = %err, "failed to clear history");
            return Err(err);
        }
        self.history.clear();
        Ok(())
    }

    /// Serializes the cached history for export.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn export_history(&self) -> Result<String, serde_json::Error> {
        export_history(&self.history)
    }

    /// Replaces the cached history with an imported file.
    ///
    /// The cache changes only if the whole file is valid.
    ///
    /// # Errors
    /// Returns the `ImportFormatError` describing the first problem.
    pub fn import_history(&mut self, text: &str) -> Result<usize, ImportFormatError> {
        let items = import_history(text)?;
        let count = items.len();
        self.history = items;
        info!(count, "history imported");
        Ok(count)
    }

    /// Loads a cached history item into the draft. Returns false if no item
    /// has that id.
    pub fn load_history_item(&mut self, id: &str) -> bool {
        let Some(item) = self.history.iter().find(|item| item.id == id) else {
            return false;
        };
        self.draft.load(&item.request);
        true
    }

    /// Loads a request into the draft.
    pub fn load_request(&mut self, request: &RequestDescriptor) {
        self.draft.load(request);
    }

    /// Loads a saved collection request into the draft.
    pub fn load_saved_request(&mut self, request: &SavedRequest) {
        self.draft.load(&request.to_descriptor());
    }

    /// Cached collections.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Reloads collections from the store. On failure the cache is kept.
    ///
    /// # Errors
    /// Returns the store's `PersistenceError` after logging it.
    pub async fn refresh_collections(&mut self) -> Result<&[Collection], PersistenceError> {
        match self.collection_service.list(&self.user).await {
            Ok(collections) => {
                self.collections = collections;
                Ok(&self.collections)
            }
            Err(err) => {
                warn!(error = %err, "failed to load collections");
                Err(err)
            }
        }
    }

    /// Creates a collection and reloads the cache.
    ///
    /// # Errors
    /// Returns a `CollectionError` if the name is blank or the store fails.
    /// A failed reload after a successful create is only logged.
    pub async fn create_collection(&mut self, name: &str) -> Result<(), CollectionError> {
        self.collection_service.create(name, &self.user).await?;
        // Reload errors are already logged by refresh_collections.
        let _ = self.refresh_collections().await;
        Ok(())
    }

    /// Saves the draft into a collection and reloads the cache.
    ///
    /// # Errors
    /// Returns a `CollectionError` if the body is not JSON or the store fails.
    pub async fn save_to_collection(
        &mut self,
        collection_id: &str,
    ) -> Result<SavedRequest, CollectionError> {
        let saved = self
            .collection_service
            .save_request(collection_id, &self.draft)
            .await?;
        let _ = self.refresh_collections().await;
        Ok(saved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_support::{MemoryCollections, MemoryHistory, MockProxy};
    use courier_domain::{HttpMethod, ResponseStatus};
    use pretty_assertions::assert_eq;

    type TestSession = Session<MockProxy, MemoryHistory, MemoryCollections>;

    fn session_with(proxy: MockProxy, history: MemoryHistory) -> TestSession {
        Session::new(
            Arc::new(proxy),
            Arc::new(history),
            Arc::new(MemoryCollections::default()),
            EnvironmentRegistry::default(),
        )
    }

    fn session() -> TestSession {
        session_with(MockProxy::ok(), MemoryHistory::default())
    }

    #[tokio::test]
    async fn test_send_then_refresh_shows_history() {
        let mut session = session();

        let status = session.send().await.status;
        assert_eq!(status, ResponseStatus::Code(200));

        let history = session.refresh_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].request.url, "https://jsonplaceholder.typicode.com/posts/1");
        assert_eq!(history[0].request.body, None);
    }

    #[tokio::test]
    async fn test_flush_after_send_reloads_cached_history() {
        let mut session = session();
        assert!(session.history().is_empty());

        session.send().await;
        session.flush_history().await;
        assert_eq!(session.history().len(), 1);

        session.send().await;
        session.flush_history().await;
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_flush_without_pending_keeps_cache() {
        let mut session = session();
        let text = r#"[{"id": 1, "created_at": "2024-05-01 12:00:00", "user_id": "anonymous",
            "url": "https://a.example", "method": "GET", "headers": {}, "params": {}}]"#;
        session.import_history(text).unwrap();

        session.flush_history().await;
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_send_records_nothing() {
        let proxy = MockProxy::failing(TransportError::Timeout { timeout_ms: 30_000 });
        let mut session = session_with(proxy, MemoryHistory::default());

        let response = session.send().await.clone();
        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("request timed out after 30000ms"));
        assert!(session.refresh_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_uses_active_environment() {
        let mut session = session();
        session.draft_mut().url = "{{baseUrl}}/users".to_string();
        session.select_environment("prod").unwrap();

        session.send().await;
        let history = session.refresh_history().await.unwrap();
        assert_eq!(history[0].request.url, "https://api.example.com/users");
    }

    #[tokio::test]
    async fn test_history_failure_keeps_cache_and_response() {
        let mut session = session_with(MockProxy::ok(), MemoryHistory::failing());
        session
            .import_history("[]")
            .unwrap();

        assert_eq!(session.send().await.status, ResponseStatus::Code(200));
        assert!(session.refresh_history().await.is_err());
        assert!(session.clear_history().await.is_err());
        assert!(session.last_response().is_some());
    }

    #[tokio::test]
    async fn test_import_failure_leaves_cache() {
        let mut session = session();
        session.send().await;
        session.refresh_history().await.unwrap();

        assert!(session.import_history("{\"not\": \"array\"}").is_err());
        assert_eq!(session.history().len(), 1);

        let exported = session.export_history().unwrap();
        session.clear_history().await.unwrap();
        assert!(session.history().is_empty());

        assert_eq!(session.import_history(&exported).unwrap(), 1);
        assert_eq!(session.history()[0].request.method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_load_history_item_rebuilds_draft() {
        let mut session = session();
        session.draft_mut().method = HttpMethod::Post;
        session.send().await;
        session.refresh_history().await.unwrap();
        let id = session.history()[0].id.clone();

        *session.draft_mut() = RequestDraft::new(HttpMethod::Get, "https://other.example");
        assert!(session.load_history_item(&id));
        assert!(!session.load_history_item("missing"));

        let draft = session.draft();
        assert_eq!(draft.method, HttpMethod::Post);
        assert_eq!(draft.url, "https://jsonplaceholder.typicode.com/posts/1");
        assert!(draft.body.starts_with("{\n  \"title\""));
        assert_eq!(draft.headers.active_count(), 1);
    }

    #[tokio::test]
    async fn test_collections_flow_and_logout() {
        let mut session = session();
        session.set_user(Some(UserId::new("u1")));

        session.create_collection("Users").await.unwrap();
        let id = session.collections()[0].id.clone();
        let saved = session.save_to_collection(&id).await.unwrap();
        assert_eq!(session.collections()[0].requests, vec![saved.clone()]);

        session.draft_mut().url = String::new();
        session.load_saved_request(&saved);
        assert_eq!(session.draft().url, saved.url);

        session.send().await;
        session.refresh_history().await.unwrap();
        session.set_user(None);
        assert!(session.user().is_anonymous());
        assert!(session.history().is_empty());
        assert!(session.collections().is_empty());
    }

    #[tokio::test]
    async fn test_response_view_of_validation_error() {
        let mut session = session();
        session.draft_mut().url = "ftp://x".to_string();
        session.send().await;

        let view = session.response_view().unwrap();
        assert_eq!(view.status_line, "Status: Error");
        assert_eq!(view.error.as_deref(), Some("URL must start with http:// or https://"));
    }
}
