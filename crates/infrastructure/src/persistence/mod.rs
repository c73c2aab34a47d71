//! File persistence.

mod history_file;

pub use history_file::{HistoryFile, HistoryFileError};
