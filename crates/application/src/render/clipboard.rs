//! Copy actions of the response panel.

use serde_json::Value;

use super::path::NodePath;

/// Destination for copied text.
///
/// Any `Fn(&str)` works, so tests can collect into a `RefCell<Vec<String>>`
/// and front ends can wrap their system clipboard.
pub trait Clipboard {
    /// Receives the copied text.
    fn copy(&self, text: &str);
}

impl<F> Clipboard for F
where
    F: Fn(&str),
{
    fn copy(&self, text: &str) {
        self(text);
    }
}

/// Text placed on the clipboard for a value.
///
/// String leaves copy their raw content; everything else is copied as
/// pretty-printed JSON.
#[must_use]
pub fn copy_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Copies the node at `path` inside `root`. Returns false if the path does
/// not exist.
pub fn copy_node(root: &Value, path: &NodePath, clipboard: &impl Clipboard) -> bool {
    match path.lookup(root) {
        Some(value) => {
            clipboard.copy(&copy_text(value));
            true
        }
        None => false,
    }
}
