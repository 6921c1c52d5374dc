//! Top-level error type of a pipeline run.

use crate::config::ConfigError;
use crate::executor::RequestError;
use std::fmt;

/// Why a pipeline run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The configuration was rejected before any request was sent.
    Config(ConfigError),

    /// A request failed; the run was aborted at this definition.
    Request {
        /// Identifier of the failing definition
        api_id: String,
        /// Zero-based fan-out element index, when the failure happened during fan-out
        iteration: Option<usize>,
        /// Underlying transport error
        source: RequestError,
    },

    /// The HTTP client could not be set up.
    Client(RequestError),

    /// The output could not be written.
    Output(String),
}

impl PipelineError {
    /// Identifier of the definition that failed, if the failure was a request.
    pub fn api_id(&self) -> Option<&str> {
        match self {
            PipelineError::Request { api_id, .. } => Some(api_id),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(err) => write!(f, "{}", err),
            PipelineError::Request {
                api_id,
                iteration: Some(index),
                source,
            } => write!(
                f,
                "API '{}' failed on fan-out element {}: {}",
                api_id, index, source
            ),
            PipelineError::Request {
                api_id,
                iteration: None,
                source,
            } => write!(f, "API '{}' failed: {}", api_id, source),
            PipelineError::Client(err) => write!(f, "Failed to initialise HTTP client: {}", err),
            PipelineError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Config(err) => Some(err),
            PipelineError::Request { source, .. } | PipelineError::Client(source) => Some(source),
            PipelineError::Output(_) => None,
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err)
    }
}
