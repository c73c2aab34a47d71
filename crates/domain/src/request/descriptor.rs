//! Resolved request descriptors and saved request templates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::method::HttpMethod;
use crate::serde_ext;

/// Header or parameter mapping. Keeps first-insertion position; a later
/// duplicate key overwrites the value in place.
pub type FieldMap = IndexMap<String, String>;

/// A fully resolved, validated request ready to hand to the proxy.
///
/// Built fresh from the draft at send time and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Target URL with placeholders already substituted.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Enabled headers with resolved values.
    #[serde(default)]
    pub headers: FieldMap,
    /// Enabled query parameters with resolved values.
    #[serde(default)]
    pub params: FieldMap,
    /// Parsed JSON body. Absent for GET and for empty body text.
    #[serde(
        default,
        deserialize_with = "serde_ext::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no headers, params or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: FieldMap::new(),
            params: FieldMap::new(),
            body: None,
        }
    }
}

/// A request stored inside a collection.
///
/// Unlike [`RequestDescriptor`] the URL and values are kept unresolved, so
/// the template can be replayed against any environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    /// URL text as typed, placeholders included.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Enabled headers, values unresolved.
    #[serde(default)]
    pub headers: FieldMap,
    /// Enabled params, values unresolved.
    #[serde(default)]
    pub params: FieldMap,
    /// Parsed JSON body, if any.
    #[serde(
        default,
        deserialize_with = "serde_ext::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Value>,
    /// Display name, e.g. `GET /posts/1`.
    #[serde(default)]
    pub name: String,
}

impl SavedRequest {
    /// Views this saved request as a descriptor (for loading into a draft).
    #[must_use]
    pub fn to_descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            url: self.url.clone(),
            method: self.method,
            headers: self.headers.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_body_is_omitted() {
        let descriptor = RequestDescriptor::new(HttpMethod::Get, "https://api.example.com/x");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            json!({
                "url": "https://api.example.com/x",
                "method": "GET",
                "headers": {},
                "params": {}
            })
        );
    }

    #[test]
    fn explicit_null_body_survives_round_trip() {
        let mut descriptor = RequestDescriptor::new(HttpMethod::Post, "https://a.example");
        descriptor.body = Some(Value::Null);
        let text = serde_json::to_string(&descriptor).unwrap();
        let back: RequestDescriptor = serde_json::from_str(&text).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let descriptor: RequestDescriptor =
            serde_json::from_str(r#"{"url":"https://a.example","method":"DELETE"}"#).unwrap();
        assert!(descriptor.headers.is_empty());
        assert!(descriptor.params.is_empty());
        assert_eq!(descriptor.body, None);
    }

    #[test]
    fn header_order_is_preserved() {
        let descriptor: RequestDescriptor = serde_json::from_str(
            r#"{"url":"https://a.example","method":"GET","headers":{"Z":"1","A":"2"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = descriptor.headers.keys().cloned().collect();
        assert_eq!(keys, vec!["Z", "A"]);
    }
}
