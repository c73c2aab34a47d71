//! Domain error types

use thiserror::Error;

use crate::request::EntryId;

/// Domain-level errors that can occur while editing session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The environment id is not part of the registry.
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    /// The variable key is not defined for the environment.
    #[error("unknown variable '{key}' in environment '{environment}'")]
    UnknownVariable {
        /// Environment id.
        environment: String,
        /// Variable key that was not found.
        key: String,
    },

    /// A registry needs at least one environment.
    #[error("environment registry cannot be empty")]
    EmptyRegistry,

    /// No entry with this id exists in the list.
    #[error("unknown entry: {0}")]
    UnknownEntry(EntryId),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
