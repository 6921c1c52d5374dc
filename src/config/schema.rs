//! Configuration schema for a harvesting pipeline.
//!
//! A pipeline file is YAML with an ordered `apis` list and a few optional
//! settings:
//!
//! ```yaml
//! output: users.csv
//! timeout: 30
//! apis:
//!   - id: users
//!     method: GET
//!     host: api.example.com
//!     url: /users
//!     mapping:
//!       - { source: id, target: user_id }
//!   - id: roles
//!     method: GET
//!     host: api.example.com
//!     url: /users/{{users.data[*].id}}/roles
//!     previousApiId: users
//!     mapping:
//!       - { source: name, target: role }
//! ```

use super::error::ConfigError;
use crate::executor::ExecutionConfig;
use crate::models::ApiDefinition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Main configuration structure for one pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// API definitions in execution order. Dependencies must come first.
    pub apis: Vec<ApiDefinition>,

    /// Destination of the CSV output. Defaults to `output.csv`.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Field delimiter of the output. Defaults to `,`.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// HTTP execution settings (`timeout`, `userAgent`).
    #[serde(flatten)]
    pub execution: ExecutionConfig,
}

impl PipelineConfig {
    /// Creates a configuration with default settings.
    pub fn new(apis: Vec<ApiDefinition>) -> Self {
        Self {
            apis,
            output: default_output(),
            delimiter: default_delimiter(),
            execution: ExecutionConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// A `previousApiId` that names no earlier definition is not an error: the
    /// definition then runs as if it had no dependency. It is logged as a
    /// warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.apis.is_empty() {
            return Err(ConfigError::NoApis);
        }

        if self.execution.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidSetting {
                setting: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidSetting {
                setting: "delimiter",
                reason: format!("{:?} cannot be used as a delimiter", self.delimiter),
            });
        }

        let mut seen = HashSet::new();
        for (position, api) in self.apis.iter().enumerate() {
            validate_definition(api, position)?;

            if let Some(dependency) = &api.previous_api_id {
                if !seen.contains(dependency.as_str()) {
                    log::warn!(
                        "API '{}' depends on '{}', which is not defined before it; it will run without the dependency",
                        api.id,
                        dependency
                    );
                }
            }

            if !seen.insert(api.id.as_str()) {
                return Err(ConfigError::DuplicateId(api.id.clone()));
            }
        }

        Ok(())
    }
}

fn validate_definition(api: &ApiDefinition, position: usize) -> Result<(), ConfigError> {
    if api.id.trim().is_empty() {
        return Err(ConfigError::MissingField {
            api: format!("#{}", position + 1),
            field: "id",
        });
    }

    if !api.has_absolute_url() && api.host.trim().is_empty() {
        return Err(ConfigError::MissingField {
            api: api.id.clone(),
            field: "host",
        });
    }

    Ok(())
}

// Default value functions for serde

fn default_output() -> PathBuf {
    PathBuf::from("output.csv")
}

fn default_delimiter() -> char {
    ','
}
