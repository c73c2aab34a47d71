//! Environment and variable domain types

mod registry;
mod variable;

pub use registry::EnvironmentRegistry;
pub use variable::{Environment, VariableMap};
