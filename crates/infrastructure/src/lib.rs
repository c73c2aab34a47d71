//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::{ReqwestBackend, SystemClock};
pub use config::{ConfigError, DEFAULT_API_BASE_URL, Settings, default_config_path};
pub use persistence::{HistoryFile, HistoryFileError};
