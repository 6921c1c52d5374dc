//! Errors raised while loading or validating a pipeline configuration.

use std::fmt;
use std::path::PathBuf;

/// Configuration errors. All of them abort before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist.
    FileNotFound(PathBuf),

    /// The file exists but could not be read.
    Io(String),

    /// The file is not valid YAML or does not match the schema.
    Parse(String),

    /// `apis` is present but empty.
    NoApis,

    /// A required definition field is missing or empty.
    MissingField {
        /// Identifier of the definition, or its position when the id itself is missing
        api: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Two definitions share the same identifier.
    DuplicateId(String),

    /// A setting has an unusable value.
    InvalidSetting {
        /// Setting name as written in the file
        setting: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Io(msg) => write!(f, "Failed to read configuration: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Invalid configuration format: {}", msg),
            ConfigError::NoApis => write!(f, "Configuration defines no APIs"),
            ConfigError::MissingField { api, field } => {
                write!(f, "API '{}' is missing required field '{}'", api, field)
            }
            ConfigError::DuplicateId(id) => write!(f, "API id '{}' is defined more than once", id),
            ConfigError::InvalidSetting { setting, reason } => {
                write!(f, "Invalid setting '{}': {}", setting, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
