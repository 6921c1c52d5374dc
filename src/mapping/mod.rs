//! Mapping service: turns response items into flat records.
//!
//! Each [`MappingRule`] copies the value at its `source` path into the field
//! named by its `target`. Rules are applied to every item of the response data
//! (a non-array payload counts as a single item), producing one [`Record`] per
//! item in item order, with fields in rule order.

use crate::models::{MappingRule, Record};
use crate::variables::path::resolve;
use serde_json::Value;

/// Envelope prefix that addresses the items themselves.
const ENVELOPE_PREFIX: &str = "data[*]";

/// Maps a payload through `rules`.
///
/// # Examples
///
/// ```
/// use api_harvest::mapping::map_items;
/// use api_harvest::models::MappingRule;
/// use serde_json::json;
///
/// let rules = vec![MappingRule::new("id", "post_id"), MappingRule::new("data[*].title", "title")];
/// let records = map_items(&json!([{"id": 1, "title": "Hi"}]), &rules);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("post_id"), Some(&json!(1)));
/// assert_eq!(records[0].get("title"), Some(&json!("Hi")));
/// ```
pub fn map_items(payload: &Value, rules: &[MappingRule]) -> Vec<Record> {
    let items: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    items.into_iter().map(|item| map_item(item, rules)).collect()
}

/// Builds one record from one item.
pub fn map_item(item: &Value, rules: &[MappingRule]) -> Record {
    let mut record = Record::new();
    for rule in rules {
        let value = resolve(item, item_path(&rule.source)).into_value();
        record.insert(rule.target.clone(), value);
    }
    record
}

/// Strips the `data[*]` envelope prefix from a source path.
///
/// Items are already unwrapped from the response envelope, so `data[*].field`
/// means `field` on the item and a bare `data[*]` means the item itself.
pub fn item_path(source: &str) -> &str {
    match source.strip_prefix(ENVELOPE_PREFIX) {
        Some("") => "",
        Some(rest) => rest.strip_prefix('.').unwrap_or(source),
        None => source,
    }
}
