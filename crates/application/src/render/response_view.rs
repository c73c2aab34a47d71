//! What the response panel shows for one result.

use courier_domain::{ResponseResult, StatusCategory};
use serde_json::Value;

use super::text;
use super::tree::{ValueNode, render_with};
use super::view_state::ViewState;

/// How the body is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// The send failed; the message replaces the body.
    Error(String),
    /// Structured body (object, array or null).
    Tree(ValueNode),
    /// Anything else, shown verbatim.
    Raw(String),
}

/// Display model of a [`ResponseResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseView {
    /// `Status: 200 OK`
    pub status_line: String,
    /// Badge color.
    pub category: StatusCategory,
    /// Milliseconds: proxy time, else local time, else zero.
    pub time_ms: u64,
    /// Body size in bytes.
    pub size: u64,
    /// Client overhead over the proxy time, when measured.
    pub network_ms: Option<u64>,
    /// Failure message, if any.
    pub error: Option<String>,
    /// Header tree; `None` when there are no headers.
    pub headers: Option<ValueNode>,
    /// Body presentation.
    pub body: BodyView,
}

impl ResponseView {
    /// Builds the view with default collapse state.
    #[must_use]
    pub fn new(response: &ResponseResult) -> Self {
        Self::with_state(response, &ViewState::default(), &ViewState::default())
    }

    /// Builds the view, applying separate collapse state to headers and body.
    #[must_use]
    pub fn with_state(response: &ResponseResult, headers: &ViewState, body: &ViewState) -> Self {
        let header_tree = (!response.headers.is_empty()).then(|| {
            let value = Value::Object(
                response
                    .headers
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            );
            render_with(&value, 0, headers)
        });

        let body_view = match (&response.error, &response.body) {
            (Some(message), _) => BodyView::Error(message.clone()),
            (None, value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => {
                BodyView::Tree(render_with(value, 0, body))
            }
            (None, Value::String(raw)) => BodyView::Raw(raw.clone()),
            (None, other) => BodyView::Raw(other.to_string()),
        };

        Self {
            status_line: response.status_line(),
            category: response.category(),
            time_ms: response.display_time(),
            size: response.size,
            network_ms: response.network_time(),
            error: response.error.clone(),
            headers: header_tree,
            body: body_view,
        }
    }

    /// Formats the whole panel as text lines.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut stats = format!("Time: {}ms  Size: {} bytes", self.time_ms, self.size);
        if let Some(network) = self.network_ms {
            stats.push_str(&format!("  Network: {network}ms"));
        }

        let mut lines = vec![self.status_line.clone(), stats];

        if let Some(error) = &self.error {
            lines.push(format!("Error: {error}"));
        }

        if let Some(headers) = &self.headers {
            lines.push(String::new());
            lines.push("Headers".to_string());
            lines.extend(text::to_lines(headers));
        }

        lines.push(String::new());
        lines.push("Body".to_string());
        match &self.body {
            BodyView::Error(message) => lines.push(message.clone()),
            BodyView::Tree(node) => lines.extend(text::to_lines(node)),
            BodyView::Raw(raw) => lines.extend(raw.lines().map(str::to_string)),
        }
        lines
    }
}
