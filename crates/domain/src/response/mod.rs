//! Normalized proxy responses.

mod result;

pub use result::{ERROR_STATUS, ResponseResult, ResponseStatus, StatusCategory};
