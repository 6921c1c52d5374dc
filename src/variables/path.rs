//! Path resolution over nested JSON values.
//!
//! Paths are dot-separated segments. A segment is a plain key (`user`), a key
//! followed by one or more bracketed indexes (`items[0]`, `grid[1][2]`), or a
//! broadcast marker (`items[*]`, or a bare `[*]` applying to the current
//! value). A broadcast applies the rest of the path to every element of the
//! array and yields a [`Resolved::Sequence`] of the same length and order.
//!
//! # Examples
//!
//! ```
//! use api_harvest::variables::path::{resolve, Resolved};
//! use serde_json::json;
//!
//! let payload = json!({"data": [{"id": 1}, {"id": 2}]});
//!
//! assert_eq!(resolve(&payload, "data[1].id"), Resolved::Scalar(json!(2)));
//! assert_eq!(
//!     resolve(&payload, "data[*].id"),
//!     Resolved::Sequence(vec![Resolved::Scalar(json!(1)), Resolved::Scalar(json!(2))])
//! );
//! assert_eq!(resolve(&payload, "data[5].id"), Resolved::Undefined);
//! ```

use serde_json::Value;

/// Result of resolving a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The path did not lead anywhere.
    Undefined,
    /// A single value (which may itself be an object or array).
    Scalar(Value),
    /// One result per element of a broadcast array, in array order.
    Sequence(Vec<Resolved>),
}

impl Resolved {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Resolved::Undefined)
    }

    /// `true` when nothing was found: undefined, or a non-empty sequence whose
    /// every slot is itself unresolved.
    ///
    /// A broadcast over an empty array found the array, so it counts as resolved.
    pub fn is_unresolved(&self) -> bool {
        match self {
            Resolved::Undefined => true,
            Resolved::Scalar(_) => false,
            Resolved::Sequence(items) => {
                !items.is_empty() && items.iter().all(Resolved::is_unresolved)
            }
        }
    }

    /// Converts into a plain JSON value.
    ///
    /// Sequences become arrays, with undefined elements turned into `null`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolved::Undefined => None,
            Resolved::Scalar(value) => Some(value),
            Resolved::Sequence(items) => Some(Value::Array(
                items
                    .into_iter()
                    .map(|item| item.into_value().unwrap_or(Value::Null))
                    .collect(),
            )),
        }
    }

    /// Renders the result as text, or `None` when [unresolved](Self::is_unresolved).
    ///
    /// Sequences are joined with `,`, undefined slots rendering empty; see
    /// [`value_to_string`] for scalars.
    pub fn to_text(&self) -> Option<String> {
        if self.is_unresolved() {
            return None;
        }

        match self {
            Resolved::Undefined => None,
            Resolved::Scalar(value) => Some(value_to_string(value)),
            Resolved::Sequence(items) => Some(
                items
                    .iter()
                    .map(|item| item.to_text().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

/// Converts a JSON value to its plain text form.
///
/// Strings are unquoted, `null` is empty, arrays join their elements with `,`
/// and objects are rendered as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
    Broadcast,
}

/// Splits a path into steps. Returns `None` for malformed brackets.
fn parse_steps(path: &str) -> Option<Vec<Step<'_>>> {
    let mut steps = Vec::new();

    for segment in path.split('.') {
        let (key, mut brackets) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };

        if !key.is_empty() || brackets.is_empty() {
            steps.push(Step::Key(key));
        }

        while !brackets.is_empty() {
            let inner = brackets.strip_prefix('[')?;
            let close = inner.find(']')?;
            let selector = inner[..close].trim();
            steps.push(if selector == "*" {
                Step::Broadcast
            } else {
                Step::Index(selector.parse().ok()?)
            });
            brackets = &inner[close + 1..];
        }
    }

    Some(steps)
}

/// Resolves `path` against `root`.
///
/// Never fails: any missing key, out-of-range index, indexing into a scalar,
/// or malformed bracket yields [`Resolved::Undefined`]. An empty path resolves
/// to the root itself.
pub fn resolve(root: &Value, path: &str) -> Resolved {
    if path.is_empty() {
        return Resolved::Scalar(root.clone());
    }

    match parse_steps(path) {
        Some(steps) => resolve_steps(root, &steps),
        None => Resolved::Undefined,
    }
}

fn resolve_steps(value: &Value, steps: &[Step<'_>]) -> Resolved {
    let mut current = value;

    for (position, step) in steps.iter().enumerate() {
        let next = match *step {
            Step::Key(key) => child(current, key),
            Step::Index(index) => current.as_array().and_then(|items| items.get(index)),
            Step::Broadcast => {
                let rest = &steps[position + 1..];
                let items = match current {
                    Value::Array(items) => items.iter().map(|item| resolve_steps(item, rest)).collect(),
                    single => vec![resolve_steps(single, rest)],
                };
                return Resolved::Sequence(items);
            }
        };

        match next {
            Some(value) => current = value,
            None => return Resolved::Undefined,
        }
    }

    Resolved::Scalar(current.clone())
}

fn child<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
