//! HTTP response models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// A successful HTTP response with its body decoded to JSON.
///
/// Bodies that are not valid JSON are carried as a JSON string; empty bodies
/// become `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx for responses handed to the pipeline).
    pub status_code: u16,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Decoded response payload.
    pub body: Value,

    /// Wall-clock time from send to full body received.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a 200 response carrying the given body.
    pub fn new(body: Value) -> Self {
        Self {
            status_code: 200,
            headers: HashMap::new(),
            body,
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the data field of the body. See [`data_field`].
    pub fn data(&self) -> &Value {
        data_field(&self.body)
    }
}

/// Returns the `data` field of a response payload.
///
/// APIs either wrap their records as `{"data": ...}` or return them directly;
/// when the payload is an object with a `data` key that key is used, otherwise
/// the payload itself is the data.
pub fn data_field(payload: &Value) -> &Value {
    match payload {
        Value::Object(map) => map.get("data").unwrap_or(payload),
        _ => payload,
    }
}
