//! Courier Application - Request engine, use cases and ports
//!
//! This crate defines the application layer with:
//! - Template resolution and request building
//! - Request execution through the proxy port
//! - The structured value renderer for responses
//! - History and collection use cases
//! - Port traits for the proxy and the persistence service
//! - The session that ties them together

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod render;
pub mod request_builder;
pub mod session;
pub mod use_cases;
pub mod variable_resolver;

#[cfg(test)]
#[allow(clippy::unwrap_used, missing_docs, dead_code)]
mod test_support;

pub use error::{
    CollectionError, ImportFormatError, PersistenceError, TransportError, ValidationError,
};
pub use execute_request::{ExecuteRequest, Execution};
pub use ports::{Clock, CollectionStore, HistoryStore, ProxyClient};
pub use request_builder::RequestBuilder;
pub use session::Session;
pub use use_cases::{
    CollectionService, HistoryService, export_file_name, export_history, import_history,
    saved_request_from_draft,
};
