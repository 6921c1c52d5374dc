//! HTTP request execution configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request execution.
///
/// There is no timeout unless one is configured: a request that never
/// answers blocks the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfig {
    /// Request timeout in seconds.
    #[serde(default, rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ExecutionConfig {
    /// Creates an ExecutionConfig with the given timeout.
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout_secs: Some(timeout_secs),
            ..Self::default()
        }
    }

    /// Returns the timeout as a `Duration`, if one is set.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// User-Agent to send, falling back to the crate name and version.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("api-harvest/{}", env!("CARGO_PKG_VERSION")))
    }
}
