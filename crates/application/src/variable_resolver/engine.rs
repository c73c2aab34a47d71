//! Template resolution engine
//!
//! Substitutes `{{variable}}` placeholders with values from the active
//! environment. Unknown names are left verbatim; an empty value is a valid
//! substitution.

use courier_domain::VariableMap;

use super::parser::parse_placeholders;

/// Result of resolving one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The string with all known placeholders substituted.
    pub resolved: String,

    /// Names that were substituted, in order of appearance.
    pub resolved_names: Vec<String>,

    /// Names that had no value and were left as-is.
    pub unresolved: Vec<String>,

    /// Whether every placeholder was substituted.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no placeholders.
    #[must_use]
    pub fn no_placeholders(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_names: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }
}

/// Resolves placeholders against one variable mapping.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'a> {
    variables: &'a VariableMap,
}

impl<'a> TemplateResolver<'a> {
    /// Creates a resolver over the given variables.
    #[must_use]
    pub const fn new(variables: &'a VariableMap) -> Self {
        Self { variables }
    }

    /// Resolves all placeholders in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let placeholders = parse_placeholders(input);

        if placeholders.is_empty() {
            return ResolutionResult::no_placeholders(input);
        }

        let mut resolved_names = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for placeholder in placeholders {
            result.push_str(&input[last_end..placeholder.span.start]);

            if let Some(value) = self.variables.get(&placeholder.name) {
                result.push_str(value);
                resolved_names.push(placeholder.name);
            } else {
                result.push_str(&input[placeholder.span.clone()]);
                unresolved.push(placeholder.name);
            }

            last_end = placeholder.span.end;
        }

        result.push_str(&input[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved: result,
            resolved_names,
            unresolved,
            is_complete,
        }
    }

    /// Resolves the input and returns only the resulting string.
    #[must_use]
    pub fn resolve_str(&self, input: &str) -> String {
        self.resolve(input).resolved
    }

    /// Names in the input that would stay unresolved.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_placeholders(input)
            .into_iter()
            .filter(|p| !self.variables.contains_key(&p.name))
            .map(|p| p.name)
            .collect()
    }
}

/// Substitutes placeholders in `text` with values from `variables`.
#[must_use]
pub fn resolve(text: &str, variables: &VariableMap) -> String {
    TemplateResolver::new(variables).resolve_str(text)
}

/// Like [`resolve`], passing an absent value through unchanged.
#[must_use]
pub fn resolve_optional(text: Option<&str>, variables: &VariableMap) -> Option<String> {
    text.map(|t| resolve(t, variables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_no_placeholders() {
        let variables = vars(&[("baseUrl", "https://dev.api.example.com")]);
        let result = TemplateResolver::new(&variables).resolve("https://api.example.com/x");
        assert_eq!(result, ResolutionResult::no_placeholders("https://api.example.com/x"));
    }

    #[test]
    fn test_missing_variable_is_left_verbatim() {
        assert_eq!(resolve("{{missing}}", &VariableMap::new()), "{{missing}}");
    }

    #[test]
    fn test_empty_value_is_substituted() {
        let variables = vars(&[("a", "1"), ("b", "")]);
        assert_eq!(resolve("{{a}}-{{b}}", &variables), "1-");
    }

    #[test]
    fn test_bearer_with_empty_token() {
        let variables = vars(&[("token", "")]);
        assert_eq!(resolve("Bearer {{token}}", &variables), "Bearer ");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(resolve("", &vars(&[("a", "1")])), "");
    }

    #[test]
    fn test_absent_input_passes_through() {
        assert_eq!(resolve_optional(None, &vars(&[("a", "1")])), None);
        assert_eq!(
            resolve_optional(Some("{{a}}"), &vars(&[("a", "1")])),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_mixed_resolved_unresolved() {
        let variables = vars(&[("baseUrl", "http://localhost:3000")]);
        let result = TemplateResolver::new(&variables).resolve("{{baseUrl}}/{{unknown}}/users");
        assert_eq!(result.resolved, "http://localhost:3000/{{unknown}}/users");
        assert_eq!(result.resolved_names, vec!["baseUrl"]);
        assert_eq!(result.unresolved, vec!["unknown"]);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_repeated_placeholder() {
        let variables = vars(&[("v", "x")]);
        assert_eq!(resolve("{{v}}{{v}}-{{v}}", &variables), "xx-x");
    }

    #[test]
    fn test_no_known_placeholder_survives() {
        let variables = vars(&[("host", "example.com"), ("port", "8080"), ("empty", "")]);
        let inputs = [
            "https://{{host}}:{{port}}/{{empty}}",
            "{{{host}}}",
            "{{host}}{{port}}{{missing}}",
            "{{ host }} {{host}",
        ];
        for input in inputs {
            let output = resolve(input, &variables);
            for key in variables.keys() {
                assert!(
                    !output.contains(&format!("{{{{{key}}}}}")),
                    "{input:?} -> {output:?} still contains {key}"
                );
            }
        }
    }

    #[test]
    fn test_find_unresolved() {
        let variables = vars(&[("baseUrl", "x")]);
        let resolver = TemplateResolver::new(&variables);
        assert_eq!(resolver.find_unresolved("{{baseUrl}}/{{id}}"), vec!["id"]);
    }

    #[test]
    fn test_json_body_with_placeholders() {
        let variables = vars(&[("apiKey", "dev_123456")]);
        assert_eq!(
            resolve(r#"{"key": "{{apiKey}}"}"#, &variables),
            r#"{"key": "dev_123456"}"#
        );
    }
}
