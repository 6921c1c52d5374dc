//! Pipeline configuration loading.
//!
//! Configuration is read from a YAML file, deserialized into a
//! [`PipelineConfig`] and validated before anything is executed.

pub mod error;
pub mod schema;

pub use error::ConfigError;
pub use schema::PipelineConfig;

use std::fs;
use std::io;
use std::path::Path;

/// Loads and validates a pipeline configuration file.
///
/// # Example
///
/// ```no_run
/// use api_harvest::config::load_config;
///
/// let config = load_config("config.yaml").unwrap();
/// println!("{} APIs, writing to {}", config.apis.len(), config.output.display());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::Io(format!("{}: {}", path.display(), e)),
    })?;

    log::debug!("Loaded configuration from {}", path.display());
    parse_config(&content)
}

/// Parses and validates a pipeline configuration from YAML text.
pub fn parse_config(content: &str) -> Result<PipelineConfig, ConfigError> {
    let config: PipelineConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
