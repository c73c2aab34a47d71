//! The editable request held by a session.

use serde_json::Value;

use super::descriptor::RequestDescriptor;
use super::entry::EntryList;
use super::method::HttpMethod;

const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";
const DEFAULT_BODY: &str = "{\n  \"title\": \"Test Post\",\n  \"body\": \"This is a test\",\n  \"userId\": 1\n}";

/// Request fields exactly as the user entered them.
///
/// Nothing here is resolved or validated; the request builder turns a draft
/// into a [`RequestDescriptor`] at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    /// Selected method.
    pub method: HttpMethod,
    /// URL text, may contain placeholders.
    pub url: String,
    /// Header rows.
    pub headers: EntryList,
    /// Query parameter rows.
    pub params: EntryList,
    /// Body text (JSON expected for non-GET methods).
    pub body: String,
}

impl RequestDraft {
    /// Creates an empty draft for the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: EntryList::new(),
            params: EntryList::new(),
            body: String::new(),
        }
    }

    /// Replaces the draft with the fields of a recorded request.
    ///
    /// Headers and params come back as enabled rows in map order; the body
    /// is pretty-printed with two-space indentation.
    pub fn load(&mut self, request: &RequestDescriptor) {
        self.url.clone_from(&request.url);
        self.method = request.method;
        self.body = request.body.as_ref().map(pretty_body).unwrap_or_default();
        self.headers = EntryList::from_pairs(
            request
                .headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        self.params = EntryList::from_pairs(
            request
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }
}

fn pretty_body(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

impl Default for RequestDraft {
    fn default() -> Self {
        let mut headers = EntryList::new();
        headers.add_with("Content-Type", "application/json");
        Self {
            method: HttpMethod::Get,
            url: DEFAULT_URL.to_string(),
            headers,
            params: EntryList::new(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_draft_has_content_type_header() {
        let draft = RequestDraft::default();
        assert_eq!(draft.method, HttpMethod::Get);
        assert_eq!(draft.headers.active_count(), 1);
        assert!(draft.params.is_empty());
        assert!(serde_json::from_str::<Value>(&draft.body).is_ok());
    }

    #[test]
    fn load_replaces_every_field() {
        let mut request = RequestDescriptor::new(HttpMethod::Post, "https://api.example.com/users");
        request.headers.insert("Accept".into(), "application/json".into());
        request.params.insert("page".into(), "2".into());
        request.body = Some(json!({"name": "Ada"}));

        let mut draft = RequestDraft::default();
        draft.load(&request);

        assert_eq!(draft.url, "https://api.example.com/users");
        assert_eq!(draft.method, HttpMethod::Post);
        assert_eq!(draft.body, "{\n  \"name\": \"Ada\"\n}");
        let headers: Vec<_> = draft.headers.iter().map(|e| (e.key.as_str(), e.enabled)).collect();
        assert_eq!(headers, vec![("Accept", true)]);
        assert_eq!(draft.params.active_count(), 1);
    }

    #[test]
    fn load_without_body_clears_body_text() {
        let mut draft = RequestDraft::default();
        draft.load(&RequestDescriptor::new(HttpMethod::Get, "https://a.example"));
        assert_eq!(draft.body, "");
    }
}
