//! Courier Domain - Core business types
//!
//! This crate defines the data model of the Courier request composer:
//! request drafts and their entry lists, resolved request descriptors,
//! normalized proxy responses, history items, collections and the
//! environment registry. All types here are pure Rust with no I/O.

pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod request;
pub mod response;
mod serde_ext;
pub mod user;

pub use collection::{Collection, NewCollection};
pub use environment::{Environment, EnvironmentRegistry, VariableMap};
pub use error::{DomainError, DomainResult};
pub use history::HistoryItem;
pub use request::{
    EntryId, EntryList, FieldMap, HttpMethod, KeyValueEntry, RequestDescriptor, RequestDraft,
    SavedRequest,
};
pub use response::{ResponseResult, ResponseStatus, StatusCategory};
pub use user::UserId;
