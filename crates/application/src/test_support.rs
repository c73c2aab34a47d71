//! In-memory port implementations shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use courier_domain::{
    Collection, FieldMap, HistoryItem, NewCollection, RequestDescriptor, ResponseResult,
    ResponseStatus, SavedRequest, UserId,
};
use serde_json::json;

use crate::error::{PersistenceError, TransportError};
use crate::ports::{CollectionStore, HistoryStore, ProxyClient};

/// Proxy that answers every request with a canned result.
pub struct MockProxy {
    response: Result<ResponseResult, TransportError>,
    pub calls: Mutex<Vec<RequestDescriptor>>,
}

impl MockProxy {
    pub fn ok() -> Self {
        Self::with(Ok(ok_response()))
    }

    pub fn failing(err: TransportError) -> Self {
        Self::with(Err(err))
    }

    pub fn with(response: Result<ResponseResult, TransportError>) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProxyClient for MockProxy {
    async fn forward(&self, request: &RequestDescriptor) -> Result<ResponseResult, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

pub fn ok_response() -> ResponseResult {
    let mut headers = FieldMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    ResponseResult {
        status: ResponseStatus::Code(200),
        status_text: Some("OK".to_string()),
        headers,
        body: json!({"id": 1, "title": "hello"}),
        time: 42,
        local_time: None,
        size: 27,
        error: None,
    }
}

/// History store backed by a vector.
#[derive(Default)]
pub struct MemoryHistory {
    pub items: Mutex<Vec<HistoryItem>>,
    pub fail: bool,
}

impl MemoryHistory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn list(&self, user: &UserId) -> Result<Vec<HistoryItem>, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Status { status: 500 });
        }
        let items = self.items.lock().unwrap();
        Ok(items.iter().filter(|item| &item.user_id == user).cloned().collect())
    }

    async fn append(
        &self,
        request: &RequestDescriptor,
        user: &UserId,
    ) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Request("connection refused".to_string()));
        }
        let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut items = self.items.lock().unwrap();
        let id = (items.len() + 1).to_string();
        items.push(HistoryItem::new(
            id,
            created_at,
            user.clone(),
            request.clone(),
        ));
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Status { status: 500 });
        }
        self.items.lock().unwrap().clear();
        Ok(())
    }
}

/// Collection store backed by a vector.
#[derive(Default)]
pub struct MemoryCollections {
    pub collections: Mutex<Vec<(UserId, Collection)>>,
    pub fail: bool,
}

impl MemoryCollections {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CollectionStore for MemoryCollections {
    async fn list(&self, user: &UserId) -> Result<Vec<Collection>, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Status { status: 500 });
        }
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, collection)| collection.clone())
            .collect())
    }

    async fn create(&self, collection: &NewCollection) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Status { status: 500 });
        }
        let mut collections = self.collections.lock().unwrap();
        let id = (collections.len() + 1).to_string();
        collections.push((
            collection.user_id.clone(),
            Collection {
                id,
                name: collection.name.clone(),
                description: collection.description.clone(),
                requests: Vec::new(),
            },
        ));
        Ok(())
    }

    async fn add_request(
        &self,
        collection_id: &str,
        request: &SavedRequest,
    ) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Status { status: 500 });
        }
        let mut collections = self.collections.lock().unwrap();
        let (_, collection) = collections
            .iter_mut()
            .find(|(_, c)| c.id == collection_id)
            .ok_or(PersistenceError::Status { status: 404 })?;
        collection.requests.push(request.clone());
        Ok(())
    }
}
