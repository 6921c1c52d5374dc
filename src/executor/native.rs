//! Native HTTP transport using reqwest.

use super::{ExecutionConfig, HttpTransport, RequestError};
use crate::models::request::{ApiRequest, HttpMethod};
use crate::models::response::ApiResponse;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the underlying client from `config`.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, RequestError> {
        let start_time = Instant::now();

        let url = url::Url::parse(&request.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RequestError::UnsupportedProtocol(url.scheme().to_string()));
        }

        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        };

        let mut req_builder = self.client.request(method, url);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        match &request.body {
            Some(Value::String(raw)) => req_builder = req_builder.body(raw.clone()),
            Some(body) => req_builder = req_builder.json(body),
            None => {}
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::http_status(status.as_u16(), &text));
        }

        Ok(ApiResponse {
            status_code: status.as_u16(),
            headers,
            body: decode_body(&text),
            duration: start_time.elapsed(),
        })
    }
}

/// Decodes a response body: JSON when possible, otherwise the raw text.
/// Empty bodies decode to `null`.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
