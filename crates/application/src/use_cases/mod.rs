//! Application use cases (business logic orchestration).

mod collections;
mod history;

pub use collections::{CollectionService, saved_request_from_draft};
pub use history::{HistoryService, export_file_name, export_history, import_history};
