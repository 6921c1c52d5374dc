//! Data models for API definitions, requests, responses and output records.
//!
//! This module contains the core data structures shared by the pipeline: the
//! configured [`ApiDefinition`]s, the concrete [`ApiRequest`]s built from them,
//! the decoded [`ApiResponse`]s and the flat [`Record`]s handed to the formatter.

pub mod definition;
pub mod record;
pub mod request;
pub mod response;

pub use definition::{ApiDefinition, MappingRule};
pub use record::Record;
pub use request::{ApiRequest, HttpMethod, UnknownMethod};
pub use response::{data_field, ApiResponse};
