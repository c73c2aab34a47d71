//! Execute Request Use Case
//!
//! Sends a descriptor through the proxy and always comes back with a
//! [`ResponseResult`]. Failures are folded into the error shape, and a
//! successful send records itself in the history store in the background.

use std::sync::Arc;
use std::time::Instant;

use courier_domain::{RequestDescriptor, RequestDraft, ResponseResult, UserId, VariableMap};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{HistoryStore, ProxyClient};
use crate::request_builder::RequestBuilder;

/// Outcome of one send.
#[derive(Debug)]
pub struct Execution {
    /// Response to show; an error result if the send failed.
    pub response: ResponseResult,
    /// Background history append, spawned only on success.
    pub history: Option<JoinHandle<()>>,
}

impl Execution {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            response: ResponseResult::failure(message),
            history: None,
        }
    }

    /// Waits for the history append, if one was spawned.
    pub async fn wait_for_history(&mut self) {
        if let Some(handle) = self.history.take()
            && let Err(err) = handle.await
        {
            warn!(error = %err, "history task did not complete");
        }
    }
}

/// Use case for sending requests through the proxy.
///
/// # Example
///
/// ```ignore
/// let backend = Arc::new(HttpBackend::new(settings)?);
/// let use_case = ExecuteRequest::new(Arc::clone(&backend), backend);
///
/// let response = use_case.execute(&descriptor, &UserId::anonymous()).await;
/// println!("{}", response.status_line());
/// ```
pub struct ExecuteRequest<P, H> {
    proxy: Arc<P>,
    history: Arc<H>,
}

impl<P, H> ExecuteRequest<P, H>
where
    P: ProxyClient + 'static,
    H: HistoryStore + 'static,
{
    /// Creates the use case from its two collaborators.
    pub const fn new(proxy: Arc<P>, history: Arc<H>) -> Self {
        Self { proxy, history }
    }

    /// Builds the draft against `variables` and sends it.
    ///
    /// A draft that fails validation never reaches the proxy and is not
    /// recorded in history.
    pub async fn send(
        &self,
        draft: &RequestDraft,
        variables: &VariableMap,
        user: &UserId,
    ) -> Execution {
        match RequestBuilder::new(variables).build(draft) {
            Ok(descriptor) => self.execute_tracked(&descriptor, user).await,
            Err(err) => {
                debug!(error = %err, "request rejected before sending");
                Execution::failed(err.to_string())
            }
        }
    }

    /// Sends a descriptor and returns the normalized response.
    pub async fn execute(&self, request: &RequestDescriptor, user: &UserId) -> ResponseResult {
        self.execute_tracked(request, user).await.response
    }

    /// Like [`Self::execute`], but hands back the history task.
    pub async fn execute_tracked(&self, request: &RequestDescriptor, user: &UserId) -> Execution {
        debug!(method = %request.method, url = %request.url, "sending request");
        let started = Instant::now();

        let result = self.proxy.forward(request).await;
        let local_time = elapsed_ms(started);

        match result {
            Ok(mut response) => {
                response.local_time = Some(local_time);
                debug!(status = %response.status, local_time, "request completed");
                Execution {
                    response,
                    history: Some(self.record(request.clone(), user.clone())),
                }
            }
            Err(err) => {
                debug!(error = %err, local_time, "request failed");
                Execution::failed(err.to_string())
            }
        }
    }

    /// Appends to history off the response path. Failures are only logged.
    fn record(&self, request: RequestDescriptor, user: UserId) -> JoinHandle<()> {
        let store = Arc::clone(&self.history);
        tokio::spawn(async move {
            if let Err(err) = store.append(&request, &user).await {
                warn!(error = %err, url = %request.url, "failed to save request to history");
            }
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_support::{MemoryHistory, MockProxy, ok_response};
    use courier_domain::{EnvironmentRegistry, HttpMethod, ResponseStatus};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn use_case(
        proxy: MockProxy,
        history: MemoryHistory,
    ) -> ExecuteRequest<MockProxy, MemoryHistory> {
        ExecuteRequest::new(Arc::new(proxy), Arc::new(history))
    }

    #[tokio::test]
    async fn test_execute_success_attaches_local_time() {
        let use_case = use_case(MockProxy::ok(), MemoryHistory::default());
        let request = RequestDescriptor::new(HttpMethod::Get, "https://api.example.com/x");

        let response = use_case.execute(&request, &UserId::anonymous()).await;

        assert_eq!(response.status, ResponseStatus::Code(200));
        assert_eq!(response.time, ok_response().time);
        assert!(response.local_time.is_some());
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_success_appends_history_once() {
        let history = Arc::new(MemoryHistory::default());
        let use_case = ExecuteRequest::new(Arc::new(MockProxy::ok()), Arc::clone(&history));
        let request = RequestDescriptor::new(HttpMethod::Get, "https://api.example.com/x");

        let mut execution = use_case.execute_tracked(&request, &UserId::new("u1")).await;
        execution.wait_for_history().await;

        let items = history.items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].request, request);
        assert_eq!(items[0].user_id, UserId::new("u1"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_error_shape() {
        let history = Arc::new(MemoryHistory::default());
        let proxy = MockProxy::failing(TransportError::Connection("refused".to_string()));
        let use_case = ExecuteRequest::new(Arc::new(proxy), Arc::clone(&history));
        let request = RequestDescriptor::new(HttpMethod::Get, "https://api.example.com/x");

        let execution = use_case.execute_tracked(&request, &UserId::anonymous()).await;

        let response = execution.response;
        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("could not reach proxy: refused"));
        assert_eq!(response.body, Value::Null);
        assert!(response.headers.is_empty());
        assert_eq!((response.time, response.size), (0, 0));
        assert!(execution.history.is_none());
        assert_eq!(history.len(), 0);
    }

    #[tokio::test]
    async fn test_history_failure_does_not_affect_response() {
        let use_case = use_case(MockProxy::ok(), MemoryHistory::failing());
        let request = RequestDescriptor::new(HttpMethod::Get, "https://api.example.com/x");

        let mut execution = use_case.execute_tracked(&request, &UserId::anonymous()).await;
        execution.wait_for_history().await;

        assert_eq!(execution.response.status, ResponseStatus::Code(200));
    }

    #[tokio::test]
    async fn test_send_validation_error_skips_proxy() {
        let proxy = Arc::new(MockProxy::ok());
        let use_case = ExecuteRequest::new(Arc::clone(&proxy), Arc::new(MemoryHistory::default()));
        let registry = EnvironmentRegistry::default();
        let draft = RequestDraft::new(HttpMethod::Get, "ftp://x");

        let execution = use_case
            .send(&draft, registry.active_variables(), &UserId::anonymous())
            .await;

        assert_eq!(
            execution.response.error.as_deref(),
            Some("URL must start with http:// or https://")
        );
        assert_eq!(execution.response.status, ResponseStatus::Error);
        assert_eq!(proxy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_forwards_resolved_descriptor() {
        let proxy = Arc::new(MockProxy::ok());
        let use_case = ExecuteRequest::new(Arc::clone(&proxy), Arc::new(MemoryHistory::default()));
        let registry = EnvironmentRegistry::default();
        let mut draft = RequestDraft::new(HttpMethod::Post, "{{baseUrl}}/posts");
        draft.body = "{\"a\": 1}".to_string();

        let mut execution = use_case
            .send(&draft, registry.active_variables(), &UserId::anonymous())
            .await;
        execution.wait_for_history().await;

        let calls = proxy.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://dev.api.example.com/posts");
        assert_eq!(calls[0].body, Some(serde_json::json!({"a": 1})));
    }
}
