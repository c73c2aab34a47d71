//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the request engine and the external
//! collaborators: the proxy that performs outbound calls and the service
//! that stores history and collections. Adapters live in the infrastructure
//! crate; tests provide in-memory implementations.

mod clock;
mod collection_store;
mod history_store;
mod proxy;

pub use clock::Clock;
pub use collection_store::CollectionStore;
pub use history_store::HistoryStore;
pub use proxy::ProxyClient;
