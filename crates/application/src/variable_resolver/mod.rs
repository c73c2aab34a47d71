//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` placeholders in request
//! fields.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::{TemplateResolver, resolve};
//! use courier_domain::Environment;
//!
//! let env = Environment::new("Development").with_variable("host", "localhost");
//!
//! let resolver = TemplateResolver::new(&env.variables);
//! let result = resolver.resolve("http://{{host}}/api/{{version}}");
//! assert_eq!(result.resolved, "http://localhost/api/{{version}}");
//! assert_eq!(result.unresolved, vec!["version"]);
//!
//! assert_eq!(resolve("{{host}}:8080", &env.variables), "localhost:8080");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, TemplateResolver, resolve, resolve_optional};
pub use parser::{
    Placeholder, extract_placeholder_names, has_placeholders, is_valid_variable_name,
    parse_placeholders,
};
