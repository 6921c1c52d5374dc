//! Integration tests module for API Harvest
//!
//! Shared helpers for the pipeline tests. HTTP is served by a local
//! `wiremock` server.

pub mod chaining_test;
pub mod end_to_end_test;

use api_harvest::models::{ApiDefinition, HttpMethod};
use api_harvest::pipeline::Orchestrator;
use api_harvest::executor::{ExecutionConfig, ReqwestTransport};

/// GET definition without mapping rules.
pub fn api(id: &str, host: &str, url: &str) -> ApiDefinition {
    ApiDefinition::new(id, HttpMethod::GET, host, url)
}

/// Orchestrator over a real reqwest transport.
pub fn orchestrator(config: &ExecutionConfig) -> Orchestrator<ReqwestTransport> {
    let transport = ReqwestTransport::new(config).expect("Failed to build transport");
    Orchestrator::new(transport)
}
