//! Backend API client using reqwest.
//!
//! One adapter implements all three outbound ports against the backend's
//! REST surface:
//!
//! | Port | Call |
//! |---|---|
//! | `ProxyClient::forward` | `POST /proxy` |
//! | `HistoryStore::list` | `GET /history?user_id=…` |
//! | `HistoryStore::append` | `POST /history` |
//! | `HistoryStore::clear` | `DELETE /clear` |
//! | `CollectionStore::list` | `GET /collections?user_id=…` |
//! | `CollectionStore::create` | `POST /collections` |
//! | `CollectionStore::add_request` | `POST /collections/:id/requests` |

use std::time::Duration;

use async_trait::async_trait;
use courier_application::ports::{CollectionStore, HistoryStore, ProxyClient};
use courier_application::{PersistenceError, TransportError};
use courier_domain::{
    Collection, HistoryItem, NewCollection, RequestDescriptor, ResponseResult, SavedRequest,
    UserId,
};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::{ConfigError, Settings};

/// Body of `POST /history`: the descriptor with the owner alongside.
#[derive(Serialize)]
struct HistoryEntry<'a> {
    #[serde(flatten)]
    request: &'a RequestDescriptor,
    user_id: &'a UserId,
}

/// reqwest-based client for the proxy and persistence service.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
}

impl ReqwestBackend {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path or the client
    /// cannot be created.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        if base_url.cannot_be_a_base() {
            return Err(TransportError::Other(format!(
                "API base URL cannot carry a path: {base_url}"
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("Courier/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Creates a client from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let base_url = settings.base_url()?;
        Self::new(base_url, settings.timeout()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: settings.api_base_url.clone(),
            message: e.to_string(),
        })
    }

    /// The API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Builds an endpoint URL with `?user_id=<user>`.
    fn user_endpoint(&self, segment: &str, user: &UserId) -> Url {
        let mut url = self.endpoint(&[segment]);
        url.query_pairs_mut().append_pair("user_id", user.as_str());
        url
    }

    /// Maps reqwest errors on the proxy path to `TransportError`.
    fn map_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_connect() {
            return TransportError::Connection(error.to_string());
        }

        if error.is_decode() || error.is_body() {
            return TransportError::InvalidResponse(error.to_string());
        }

        TransportError::Other(error.to_string())
    }

    /// Rejects non-2xx answers from the persistence endpoints.
    fn check_status(response: Response) -> Result<Response, PersistenceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(PersistenceError::Status {
                status: status.as_u16(),
            })
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PersistenceError> {
        let body = response
            .text()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| PersistenceError::InvalidResponse(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segment: &str,
        user: &UserId,
    ) -> Result<Vec<T>, PersistenceError> {
        let url = self.user_endpoint(segment, user);
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        Self::read_json(Self::check_status(response)?).await
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), PersistenceError> {
        let url = self.endpoint(segments);
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[async_trait]
impl ProxyClient for ReqwestBackend {
    async fn forward(&self, request: &RequestDescriptor) -> Result<ResponseResult, TransportError> {
        let url = self.endpoint(&["proxy"]);
        debug!(%url, method = %request.method, target = %request.url, "forwarding request");

        // The proxy's own status is not inspected; its JSON body carries the
        // upstream status.
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let body = response.text().await.map_err(|e| self.map_error(&e))?;
        serde_json::from_str(&body).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HistoryStore for ReqwestBackend {
    async fn list(&self, user: &UserId) -> Result<Vec<HistoryItem>, PersistenceError> {
        self.get_list("history", user).await
    }

    async fn append(
        &self,
        request: &RequestDescriptor,
        user: &UserId,
    ) -> Result<(), PersistenceError> {
        let entry = HistoryEntry {
            request,
            user_id: user,
        };
        self.post_json(&["history"], &entry).await
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        let url = self.endpoint(&["clear"]);
        debug!(%url, "DELETE");
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for ReqwestBackend {
    async fn list(&self, user: &UserId) -> Result<Vec<Collection>, PersistenceError> {
        self.get_list("collections", user).await
    }

    async fn create(&self, collection: &NewCollection) -> Result<(), PersistenceError> {
        self.post_json(&["collections"], collection).await
    }

    async fn add_request(
        &self,
        collection_id: &str,
        request: &SavedRequest,
    ) -> Result<(), PersistenceError> {
        self.post_json(&["collections", collection_id, "requests"], request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn make_backend(base: &str) -> ReqwestBackend {
        ReqwestBackend::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let backend = make_backend("http://localhost:5000/api");
        assert_eq!(
            backend.endpoint(&["proxy"]).as_str(),
            "http://localhost:5000/api/proxy"
        );

        let backend = make_backend("http://localhost:5000/api/");
        assert_eq!(
            backend.endpoint(&["collections", "7", "requests"]).as_str(),
            "http://localhost:5000/api/collections/7/requests"
        );
    }

    #[test]
    fn endpoint_encodes_segments_and_queries() {
        let backend = make_backend("http://localhost:5000/api");
        assert_eq!(
            backend.endpoint(&["collections", "a/b", "requests"]).as_str(),
            "http://localhost:5000/api/collections/a%2Fb/requests"
        );
        assert_eq!(
            backend
                .user_endpoint("history", &UserId::new("user 1&x"))
                .as_str(),
            "http://localhost:5000/api/history?user_id=user+1%26x"
        );
    }

    #[test]
    fn history_entry_flattens_descriptor() {
        let request = RequestDescriptor::new(HttpMethod::Get, "https://a.example");
        let user = UserId::anonymous();
        let entry = HistoryEntry {
            request: &request,
            user_id: &user,
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "url": "https://a.example",
                "method": "GET",
                "headers": {},
                "params": {},
                "user_id": "anonymous"
            })
        );
    }

    #[test]
    fn rejects_base_without_path() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(ReqwestBackend::new(url, Duration::from_secs(1)).is_err());
    }
}
