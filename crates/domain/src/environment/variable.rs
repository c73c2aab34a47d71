//! Environment variable types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variables of one environment, in display order.
pub type VariableMap = IndexMap<String, String>;

/// A named set of variables usable for template substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Display name (e.g., "Development", "Production").
    pub name: String,
    /// Variable values keyed by name.
    #[serde(default)]
    pub variables: VariableMap,
}

impl Environment {
    /// Creates an environment with no variables.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: VariableMap::new(),
        }
    }

    /// Adds a variable, builder style.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Looks up a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}
