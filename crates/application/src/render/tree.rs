//! Recursive conversion of a JSON value into a display tree.

use serde_json::Value;

use super::path::{NodePath, PathSegment};
use super::view_state::ViewState;

/// At most this many children of a container are shown.
pub const MAX_CHILDREN: usize = 20;

/// A rendered JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueNode {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Number in its JSON text form.
    Number(String),
    /// String leaf; the one leaf that offers a copy action.
    String(String),
    /// `[]`
    EmptyArray,
    /// `{}`
    EmptyObject,
    /// Non-empty array or object.
    Branch(Branch),
}

/// Kind of container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

/// A non-empty container node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Array or object.
    pub kind: BranchKind,
    /// Address of this node, used as the key into [`ViewState`].
    pub path: NodePath,
    /// Nesting depth this node was rendered at.
    pub depth: usize,
    /// Total number of children in the data.
    pub len: usize,
    /// Whether children were materialized.
    pub expanded: bool,
    /// Rendered children; empty while collapsed.
    pub children: Vec<Child>,
    /// Children left out by the [`MAX_CHILDREN`] cap.
    pub hidden: usize,
}

/// A child of a container with its index or key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    /// Index (arrays) or key (objects).
    pub segment: PathSegment,
    /// The rendered child value.
    pub node: ValueNode,
}

impl Branch {
    /// Header text, e.g. `Array [3]` or `Object { 2 }`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            BranchKind::Array => format!("Array [{}]", self.len),
            BranchKind::Object => format!("Object {{ {} }}", self.len),
        }
    }

    /// Summary of hidden children, if any were cut.
    #[must_use]
    pub fn more_label(&self) -> Option<String> {
        if self.hidden == 0 {
            return None;
        }
        let noun = match self.kind {
            BranchKind::Array => "items",
            BranchKind::Object => "properties",
        };
        Some(format!("... and {} more {noun}", self.hidden))
    }
}

/// Renders `value` at `depth` with default collapse state.
#[must_use]
pub fn render(value: &Value, depth: usize) -> ValueNode {
    render_with(value, depth, &ViewState::default())
}

/// Renders `value` at `depth`, applying the overrides in `view`.
#[must_use]
pub fn render_with(value: &Value, depth: usize, view: &ViewState) -> ValueNode {
    render_node(value, NodePath::root(), depth, view)
}

fn render_node(value: &Value, path: NodePath, depth: usize, view: &ViewState) -> ValueNode {
    match value {
        Value::Null => ValueNode::Null,
        Value::Bool(flag) => ValueNode::Bool(*flag),
        Value::Number(number) => ValueNode::Number(number.to_string()),
        Value::String(text) => ValueNode::String(text.clone()),
        Value::Array(items) if items.is_empty() => ValueNode::EmptyArray,
        Value::Object(map) if map.is_empty() => ValueNode::EmptyObject,
        Value::Array(items) => ValueNode::Branch(render_branch(
            BranchKind::Array,
            items.len(),
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (PathSegment::Index(index), item)),
            path,
            depth,
            view,
        )),
        Value::Object(map) => ValueNode::Branch(render_branch(
            BranchKind::Object,
            map.len(),
            map.iter()
                .map(|(key, item)| (PathSegment::Key(key.clone()), item)),
            path,
            depth,
            view,
        )),
    }
}

fn render_branch<'v>(
    kind: BranchKind,
    len: usize,
    entries: impl Iterator<Item = (PathSegment, &'v Value)>,
    path: NodePath,
    depth: usize,
    view: &ViewState,
) -> Branch {
    let expanded = view.is_expanded(&path, depth);

    let (children, hidden) = if expanded {
        let children = entries
            .take(MAX_CHILDREN)
            .map(|(segment, item)| {
                let node = render_node(item, path.child(segment.clone()), depth + 1, view);
                Child { segment, node }
            })
            .collect();
        (children, len.saturating_sub(MAX_CHILDREN))
    } else {
        (Vec::new(), 0)
    };

    Branch {
        kind,
        path,
        depth,
        len,
        expanded,
        children,
        hidden,
    }
}
