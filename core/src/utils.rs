//! Utility functions and types.

use std::fmt::Debug;

/// Redact hides secrets when a value is formatted with `{:?}`.
///
/// - Empty input prints `EMPTY`.
/// - Input shorter than 12 bytes is fully hidden.
/// - Longer input keeps its first and last three characters so different
///   secrets can still be told apart in logs.
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value.as_str()))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(value) = self.0 else {
            return f.write_str("None");
        };

        let length = value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 || !value.is_char_boundary(3) || !value.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            write!(f, "{}***{}", &value[..3], &value[length - 3..])
        }
    }
}

/// Trim a header value and collapse every inner whitespace run into one space.
///
/// ```
/// use cloudsign_core::utils::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  a   b\tc "), "a b c");
/// ```
pub fn collapse_whitespace(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    for (idx, word) in value.split_ascii_whitespace().enumerate() {
        if idx > 0 {
            s.push(' ');
        }
        s.push_str(word);
    }
    s
}
