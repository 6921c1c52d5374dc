//! API definitions as declared in a pipeline configuration.

use super::request::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `(source, target)` pair copying one value out of a response item.
///
/// `from`/`to` are accepted as aliases, which is what generated configs use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    /// Path expression evaluated against one response item.
    #[serde(alias = "from")]
    pub source: String,

    /// Output field name.
    #[serde(alias = "to")]
    pub target: String,
}

impl MappingRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One API call of a pipeline.
///
/// Definitions are immutable for the duration of a run. `url`, `parameters`
/// and `body` may contain `{{apiId.path}}` placeholders that are resolved
/// against the stored result of `previous_api_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    /// Unique identifier, also the key under which the first response is stored.
    pub id: String,

    /// Human readable name, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub method: HttpMethod,

    /// Host name, optionally with a scheme (`http://localhost:8080`).
    #[serde(default)]
    pub host: String,

    /// Request path appended to `host`, or an absolute URL.
    #[serde(default, alias = "path")]
    pub url: String,

    /// Static query parameters.
    #[serde(default)]
    pub parameters: Map<String, Value>,

    /// Static headers, passed through untouched.
    #[serde(default)]
    pub headers: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Identifier of the definition whose result this one depends on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_api_id: Option<String>,

    /// Field mapping applied to every response item.
    pub mapping: Vec<MappingRule>,
}

impl ApiDefinition {
    /// Creates a definition with no parameters, headers, body or dependency.
    pub fn new(
        id: impl Into<String>,
        method: HttpMethod,
        host: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            method,
            host: host.into(),
            url: url.into(),
            parameters: Map::new(),
            headers: Map::new(),
            body: None,
            previous_api_id: None,
            mapping: Vec::new(),
        }
    }

    /// Declares the dependency on a previously executed definition.
    pub fn depends_on(mut self, api_id: impl Into<String>) -> Self {
        self.previous_api_id = Some(api_id.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_mapping(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.mapping.push(MappingRule::new(source, target));
        self
    }

    /// Whether `url` is already an absolute http(s) URL.
    pub fn has_absolute_url(&self) -> bool {
        is_absolute_url(&self.url)
    }
}

pub(crate) fn is_absolute_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
