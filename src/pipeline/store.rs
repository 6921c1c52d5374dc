//! Per-run store of raw API responses.

use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Raw response payloads keyed by API identifier.
///
/// A store lives for exactly one pipeline run. Each identifier is written at
/// most once: the first successful response wins and later responses for the
/// same identifier (fan-out iterations) are ignored.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: HashMap<String, Value>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `payload` under `api_id` unless an entry already exists.
    ///
    /// Returns `true` if the payload was stored.
    pub fn insert_if_absent(&mut self, api_id: &str, payload: &Value) -> bool {
        match self.entries.entry(api_id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(payload.clone());
                true
            }
        }
    }

    pub fn get(&self, api_id: &str) -> Option<&Value> {
        self.entries.get(api_id)
    }

    pub fn contains(&self, api_id: &str) -> bool {
        self.entries.contains_key(api_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
