//! Response result type
//!
//! The proxy answers with a JSON document describing the upstream response.
//! Failures that happen before or during delegation are folded into the same
//! shape with the `"Error"` status sentinel, so one renderer handles both.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::request::FieldMap;
use crate::serde_ext;

/// Status sentinel used for failed sends.
pub const ERROR_STATUS: &str = "Error";

/// Status of a response: an HTTP code, or the error sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Upstream HTTP status code.
    Code(u16),
    /// The send failed; see `ResponseResult::error`.
    Error,
}

impl ResponseStatus {
    /// Returns the numeric code, if any.
    #[must_use]
    pub const fn code(self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(code),
            Self::Error => None,
        }
    }

    /// Returns the color category used by the status badge.
    #[must_use]
    pub const fn category(self) -> StatusCategory {
        match self {
            Self::Code(200..=299) => StatusCategory::Success,
            Self::Code(300..=399) => StatusCategory::Redirection,
            Self::Code(400..=499) => StatusCategory::ClientError,
            Self::Code(500..) => StatusCategory::ServerError,
            Self::Code(_) | Self::Error => StatusCategory::Unknown,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Error => f.write_str(ERROR_STATUS),
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Code(code) => serializer.serialize_u16(*code),
            Self::Error => serializer.serialize_str(ERROR_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(Self::Code(code)),
            Raw::Label(label) if label == ERROR_STATUS => Ok(Self::Error),
            Raw::Label(label) => Err(serde::de::Error::custom(format!(
                "unexpected response status: {label}"
            ))),
        }
    }
}

/// Color category for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// Green - 2xx
    Success,
    /// Blue - 3xx
    Redirection,
    /// Yellow - 4xx
    ClientError,
    /// Red - 5xx
    ServerError,
    /// Gray - anything else, including failed sends
    Unknown,
}

/// Response of one send, as shown in the response panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    /// HTTP status or the error sentinel.
    pub status: ResponseStatus,
    /// Reason phrase reported by the proxy.
    #[serde(rename = "statusText", default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Upstream response headers.
    #[serde(default)]
    pub headers: FieldMap,
    /// Upstream body: parsed JSON, a raw string, or null.
    #[serde(default)]
    pub body: Value,
    /// Upstream time measured by the proxy, in milliseconds.
    #[serde(default, deserialize_with = "serde_ext::lenient_u64")]
    pub time: u64,
    /// Round trip measured on the client, in milliseconds.
    #[serde(rename = "localTime", default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<u64>,
    /// Body size in bytes as reported by the proxy.
    #[serde(default, deserialize_with = "serde_ext::lenient_u64")]
    pub size: u64,
    /// Failure message. Present only with [`ResponseStatus::Error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseResult {
    /// Builds the canonical error shape for a failed send.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_text: None,
            headers: FieldMap::new(),
            body: Value::Null,
            time: 0,
            local_time: None,
            size: 0,
            error: Some(message.into()),
        }
    }

    /// Returns true if this result describes a failed send.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.status, ResponseStatus::Error)
    }

    /// Time shown in the status bar: proxy time, else local time, else zero.
    #[must_use]
    pub fn display_time(&self) -> u64 {
        if self.time > 0 {
            self.time
        } else {
            self.local_time.unwrap_or(0)
        }
    }

    /// Client-side overhead on top of the proxy time.
    #[must_use]
    pub fn network_time(&self) -> Option<u64> {
        self.local_time
            .filter(|ms| *ms > 0)
            .map(|ms| ms.saturating_sub(self.time))
    }

    /// Returns the color category of the status.
    #[must_use]
    pub const fn category(&self) -> StatusCategory {
        self.status.category()
    }

    /// Status line, e.g. `Status: 200 OK`.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.status_text {
            Some(text) if !text.is_empty() => format!("Status: {} {text}", self.status),
            _ => format!("Status: {}", self.status),
        }
    }
}
