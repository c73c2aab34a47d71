//! Placeholder parser for `{{variable}}` syntax
//!
//! A placeholder is two opening braces, one or more ASCII word characters
//! (`A-Z`, `a-z`, `0-9`, `_`) and two closing braces. Anything else,
//! including whitespace inside the braces, is plain text.

use std::ops::Range;

/// A placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The variable name (without `{{ }}`).
    pub name: String,

    /// Byte range of the whole placeholder in the original string.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Finds every placeholder, scanning left to right without overlaps.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parse_placeholders;
///
/// let found = parse_placeholders("{{baseUrl}}/users/{{ id }}");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "baseUrl");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let bytes = input.as_bytes();
    let mut placeholders = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let name_start = i + 2;
            let name_len = bytes[name_start..]
                .iter()
                .take_while(|b| is_word_byte(**b))
                .count();
            let name_end = name_start + name_len;

            if name_len > 0 && bytes[name_end..].starts_with(b"}}") {
                // Word characters are ASCII, so these are char boundaries.
                placeholders.push(Placeholder::new(&input[name_start..name_end], i..name_end + 2));
                i = name_end + 2;
                continue;
            }
        }
        i += 1;
    }

    placeholders
}

/// Returns true if `name` could appear inside a placeholder.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_word_byte)
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}

/// Extracts just the placeholder names, in order of appearance.
#[must_use]
pub fn extract_placeholder_names(input: &str) -> Vec<String> {
    parse_placeholders(input)
        .into_iter()
        .map(|p| p.name)
        .collect()
}
