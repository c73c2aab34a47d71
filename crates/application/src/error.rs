//! Application error types
//!
//! Every failure a send can hit ends up as data: validation and transport
//! errors become an error `ResponseResult`, persistence errors are logged,
//! and import errors are reported without touching session state.

use thiserror::Error;

/// Problems with user input, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The resolved URL is blank.
    #[error("URL is required")]
    MissingUrl,

    /// The resolved URL does not begin with `http`.
    #[error("URL must start with http:// or https://")]
    UnsupportedScheme,

    /// The body text of a non-GET request is not valid JSON.
    #[error("Invalid JSON in request body")]
    InvalidJsonBody,

    /// A collection needs a non-blank name.
    #[error("Collection name is required")]
    MissingCollectionName,
}

/// Failure while delegating a request to the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport gave up waiting.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The proxy could not be reached.
    #[error("could not reach proxy: {0}")]
    Connection(String),

    /// The proxy answered with something that is not a response document.
    #[error("invalid proxy response: {0}")]
    InvalidResponse(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Failure while reading or writing history and collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached.
    #[error("storage request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("storage returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The store answered with an unexpected payload.
    #[error("invalid storage response: {0}")]
    InvalidResponse(String),
}

/// A history file that cannot be imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportFormatError {
    /// The file is not JSON at all.
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    /// The file is JSON but not an array.
    #[error("Invalid history format: expected a JSON array")]
    NotAnArray,

    /// One element of the array is not a history item.
    #[error("Invalid history item at index {index}: {message}")]
    InvalidItem {
        /// Position in the array.
        index: usize,
        /// Parser message.
        message: String,
    },
}

/// Errors from collection use cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The input was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
