//! Plain-text rendering of a value tree.

use super::path::PathSegment;
use super::tree::{Branch, ValueNode};

const INDENT: &str = "  ";
const EXPANDED_MARKER: &str = "▾";
const COLLAPSED_MARKER: &str = "▸";

/// Formats a tree as indented lines.
///
/// ```text
/// ▾ Object { 2 }
///   id: 1
///   tags: ▸ Array [3]
/// ```
#[must_use]
pub fn to_lines(node: &ValueNode) -> Vec<String> {
    let mut lines = Vec::new();
    write_node(node, None, 0, &mut lines);
    lines
}

/// Formats a tree as one string, lines joined with `\n`.
#[must_use]
pub fn to_text(node: &ValueNode) -> String {
    to_lines(node).join("\n")
}

/// Single-line form of a leaf, or the header of a branch.
#[must_use]
pub fn summary(node: &ValueNode) -> String {
    match node {
        ValueNode::Null => "null".to_string(),
        ValueNode::Bool(flag) => flag.to_string(),
        ValueNode::Number(number) => number.clone(),
        ValueNode::String(text) => format!("\"{text}\""),
        ValueNode::EmptyArray => "[]".to_string(),
        ValueNode::EmptyObject => "{}".to_string(),
        ValueNode::Branch(branch) => {
            let marker = if branch.expanded {
                EXPANDED_MARKER
            } else {
                COLLAPSED_MARKER
            };
            format!("{marker} {}", branch.label())
        }
    }
}

fn write_node(
    node: &ValueNode,
    label: Option<&PathSegment>,
    level: usize,
    lines: &mut Vec<String>,
) {
    let indent = INDENT.repeat(level);
    let text = summary(node);
    match label {
        Some(segment) => lines.push(format!("{indent}{segment}: {text}")),
        None => lines.push(format!("{indent}{text}")),
    }

    if let ValueNode::Branch(branch) = node {
        write_children(branch, level + 1, lines);
    }
}

fn write_children(branch: &Branch, level: usize, lines: &mut Vec<String>) {
    for child in &branch.children {
        write_node(&child.node, Some(&child.segment), level, lines);
    }
    if let Some(more) = branch.more_label() {
        lines.push(format!("{}{more}", INDENT.repeat(level)));
    }
}
