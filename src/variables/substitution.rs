//! Template substitution engine for chained requests
//!
//! This module replaces `{{apiId.path}}` placeholders inside request URLs,
//! parameters and bodies with values taken from the stored result of a
//! previous API call. Substitution walks strings, objects and arrays
//! recursively and never fails: placeholders naming another API, or whose path
//! does not resolve, are left in the output exactly as written.

use super::path::resolve;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Cached regex pattern for matching {{apiId.path}} with optional whitespace.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Failed to compile placeholder regex"));

/// Broadcast marker inside a placeholder path.
pub const BROADCAST_MARKER: &str = "[*]";

/// A `{{apiId.path}}` placeholder split into its two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub api_id: &'a str,
    pub path: &'a str,
}

impl<'a> Placeholder<'a> {
    /// Splits the expression between the braces on its first `.`.
    ///
    /// An expression without a dot refers to the whole payload.
    pub fn parse(expr: &'a str) -> Self {
        let expr = expr.trim();
        match expr.split_once('.') {
            Some((api_id, path)) => Self { api_id, path },
            None => Self {
                api_id: expr,
                path: "",
            },
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.path.contains(BROADCAST_MARKER)
    }
}

/// Iterates over every placeholder in `text`, in order of appearance.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| Placeholder::parse(m.as_str()))
}

/// Returns `true` if `text` holds a broadcast placeholder for `api_id`,
/// e.g. `{{users.data[*].id}}` for `users`.
pub fn contains_broadcast(text: &str, api_id: &str) -> bool {
    placeholders(text).any(|p| p.api_id == api_id && p.is_broadcast())
}

/// Substitutes every `{{previous_api_id.path}}` placeholder in a string.
///
/// Resolved values are rendered as text; a broadcast result is joined with `,`.
/// A placeholder whose path finds nothing, including a broadcast where no
/// element has the path, is kept as written.
///
/// # Examples
///
/// ```
/// use api_harvest::variables::substitution::substitute_str;
/// use serde_json::json;
///
/// let previous = json!({"data": [{"id": 7}]});
/// let url = substitute_str("/users/{{users.data[0].id}}/{{other.x}}", &previous, "users");
/// assert_eq!(url, "/users/7/{{other.x}}");
/// ```
pub fn substitute_str(text: &str, previous: &Value, previous_api_id: &str) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    PLACEHOLDER_REGEX
        .replace_all(text, |cap: &regex::Captures<'_>| {
            let placeholder = Placeholder::parse(&cap[1]);
            if placeholder.api_id != previous_api_id {
                return cap[0].to_string();
            }
            resolve(previous, placeholder.path)
                .to_text()
                .unwrap_or_else(|| cap[0].to_string())
        })
        .into_owned()
}

/// Substitutes placeholders throughout a JSON value.
///
/// Strings are substituted with [`substitute_str`]; objects and arrays are
/// rebuilt with the same kind, key order and element order; other scalars
/// pass through unchanged.
pub fn substitute(template: &Value, previous: &Value, previous_api_id: &str) -> Value {
    match template {
        Value::String(text) => Value::String(substitute_str(text, previous, previous_api_id)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute(item, previous, previous_api_id))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), substitute(value, previous, previous_api_id)))
                .collect(),
        ),
        other => other.clone(),
    }
}
