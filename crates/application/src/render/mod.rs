//! Structured Value Renderer
//!
//! Turns arbitrary JSON into a lazily expandable tree for the response
//! panel. Rendering is pure: the same value and [`ViewState`] always give
//! the same tree. Collapse state lives in the view state, keyed by
//! [`NodePath`], never in the data.
//!
//! # Example
//!
//! ```
//! use courier_application::render::{render, to_lines};
//! use serde_json::json;
//!
//! let tree = render(&json!({"id": 1, "tags": ["a", "b"]}), 0);
//! assert_eq!(
//!     to_lines(&tree),
//!     vec!["▾ Object { 2 }", "  id: 1", "  tags: ▾ Array [2]", "    0: \"a\"", "    1: \"b\""]
//! );
//! ```

mod clipboard;
mod path;
mod response_view;
mod text;
mod tree;
mod view_state;

pub use clipboard::{Clipboard, copy_node, copy_text};
pub use path::{NodePath, PathSegment};
pub use response_view::{BodyView, ResponseView};
pub use text::{summary, to_lines, to_text};
pub use tree::{Branch, BranchKind, Child, MAX_CHILDREN, ValueNode, render, render_with};
pub use view_state::{COLLAPSE_DEPTH, ViewState};
