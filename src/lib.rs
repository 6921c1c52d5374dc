//! API Harvest
//!
//! Runs an ordered list of REST API calls described in a YAML file, chains
//! them through `{{apiId.path}}` placeholders, maps response fields into flat
//! records and writes the records as CSV.
//!
//! # Architecture
//!
//! - **models**: API definitions, requests, responses and output records
//! - **variables**: path resolution and placeholder substitution
//! - **mapping**: turns response data into records
//! - **pipeline**: the orchestrator, its request planning and the result store
//! - **executor**: the HTTP transport seam and its reqwest implementation
//! - **formatter**: delimited-text output
//! - **config**: YAML configuration loading and validation
//!
//! # Chaining
//!
//! A definition with `previousApiId` may reference the stored response of
//! that API. `{{users.data[0].id}}` picks one value. `{{users.data[*].id}}`
//! broadcasts: when the stored data is an array the definition is sent once
//! per element, in order.
//!
//! ```no_run
//! use api_harvest::config::load_config;
//! use api_harvest::formatter::TabularSerializer;
//! use api_harvest::pipeline::harvest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("config.yaml")?;
//! let records = harvest(&config).await?;
//! let csv = TabularSerializer::new(config.delimiter).serialize(&records);
//! std::fs::write(&config.output, csv)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod mapping;
pub mod models;
pub mod pipeline;
pub mod variables;

pub use config::{load_config, parse_config, ConfigError, PipelineConfig};
pub use error::PipelineError;
pub use executor::{ExecutionConfig, HttpTransport, ReqwestTransport, RequestError};
pub use formatter::{to_csv, TabularSerializer};
pub use models::{ApiDefinition, ApiRequest, ApiResponse, HttpMethod, MappingRule, Record};
pub use pipeline::{harvest, Orchestrator, ResultStore};
