//! Request Builder
//!
//! Turns the session's draft into a resolved, validated
//! [`RequestDescriptor`]. Pure: no network or storage side effects.

use courier_domain::{EntryList, FieldMap, RequestDescriptor, RequestDraft, VariableMap};

use crate::error::ValidationError;
use crate::variable_resolver::TemplateResolver;

/// Builds descriptors using the variables of the active environment.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    resolver: TemplateResolver<'a>,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder resolving placeholders from `variables`.
    #[must_use]
    pub const fn new(variables: &'a VariableMap) -> Self {
        Self {
            resolver: TemplateResolver::new(variables),
        }
    }

    /// Builds the descriptor for a draft.
    ///
    /// Steps, each a precondition for the next: resolve the URL, require it
    /// to be non-blank, require it to start with `http`, parse the body as
    /// JSON for non-GET methods, then collect the active headers and params
    /// with resolved values.
    ///
    /// # Errors
    /// Returns the first `ValidationError` hit.
    pub fn build(&self, draft: &RequestDraft) -> Result<RequestDescriptor, ValidationError> {
        let url = self.resolver.resolve_str(&draft.url);

        if url.trim().is_empty() {
            return Err(ValidationError::MissingUrl);
        }

        if !url.starts_with("http") {
            return Err(ValidationError::UnsupportedScheme);
        }

        let body = if draft.method.sends_body() && !draft.body.is_empty() {
            let parsed = serde_json::from_str(&draft.body)
                .map_err(|_| ValidationError::InvalidJsonBody)?;
            Some(parsed)
        } else {
            None
        };

        Ok(RequestDescriptor {
            url,
            method: draft.method,
            headers: self.collect(&draft.headers),
            params: self.collect(&draft.params),
            body,
        })
    }

    /// Active entries with resolved values; a later duplicate key wins.
    fn collect(&self, entries: &EntryList) -> FieldMap {
        entries
            .active()
            .map(|entry| (entry.key.clone(), self.resolver.resolve_str(&entry.value)))
            .collect()
    }
}
