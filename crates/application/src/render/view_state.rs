//! Collapse state kept beside the data.

use std::collections::HashMap;

use super::path::NodePath;

/// Containers at this depth or deeper start collapsed.
pub const COLLAPSE_DEPTH: usize = 2;

/// Expand/collapse overrides keyed by node path.
///
/// Nodes without an override follow the default: expanded when their depth
/// is below [`COLLAPSE_DEPTH`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    overrides: HashMap<NodePath, bool>,
}

impl ViewState {
    /// Creates a view state with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the node at `path`, rendered at `depth`, is expanded.
    #[must_use]
    pub fn is_expanded(&self, path: &NodePath, depth: usize) -> bool {
        self.overrides
            .get(path)
            .copied()
            .unwrap_or(depth < COLLAPSE_DEPTH)
    }

    /// Flips a node and returns its new state.
    pub fn toggle(&mut self, path: &NodePath, depth: usize) -> bool {
        let expanded = !self.is_expanded(path, depth);
        self.overrides.insert(path.clone(), expanded);
        expanded
    }

    /// Forces a node open.
    pub fn expand(&mut self, path: NodePath) {
        self.overrides.insert(path, true);
    }

    /// Forces a node closed.
    pub fn collapse(&mut self, path: NodePath) {
        self.overrides.insert(path, false);
    }

    /// Drops all overrides, e.g. when a new response arrives.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}
