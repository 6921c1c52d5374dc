//! HTTP request execution error types.
//!
//! This module defines error types that can occur while sending a pipeline
//! request, including network errors, timeouts and non-2xx responses.

use std::fmt;

/// Longest response body excerpt kept in an [`RequestError::HttpStatus`].
const MAX_BODY_EXCERPT: usize = 512;

/// Errors that can occur during HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    NetworkError(String),

    /// Request timed out before completion.
    ///
    /// Only possible when a timeout is configured.
    Timeout,

    /// The composed request URL could not be parsed.
    InvalidUrl(String),

    /// Request building error (invalid header name or value, bad body).
    BuildError(String),

    /// Only HTTP and HTTPS are supported.
    UnsupportedProtocol(String),

    /// The server answered with a non-2xx status.
    HttpStatus {
        /// Status code returned by the server
        status: u16,
        /// Leading part of the response body
        body: String,
    },
}

impl RequestError {
    /// Builds an [`RequestError::HttpStatus`], truncating long bodies.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        RequestError::HttpStatus { status, body }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout => write!(f, "Request timed out"),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            RequestError::UnsupportedProtocol(protocol) => {
                write!(f, "Unsupported protocol: {}", protocol)
            }
            RequestError::HttpStatus { status, body } if body.is_empty() => {
                write!(f, "HTTP status {}", status)
            }
            RequestError::HttpStatus { status, body } => {
                write!(f, "HTTP status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if let Some(status) = err.status() {
            RequestError::http_status(status.as_u16(), "")
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
