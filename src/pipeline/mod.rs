//! Sequential execution of API definitions.
//!
//! Definitions run strictly in the order given. Each one is planned against
//! the results stored so far (see [`plan`]), its requests are sent one at a
//! time, the first successful response is stored under the definition's id
//! and every response's data is mapped into records. The first failing
//! request aborts the run.

pub mod plan;
pub mod store;

pub use plan::{compose_url, plan_requests, RequestPlan};
pub use store::ResultStore;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::executor::{HttpTransport, ReqwestTransport};
use crate::mapping::map_items;
use crate::models::{ApiDefinition, Record};
use std::time::Instant;
use uuid::Uuid;

/// Runs API definitions against an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct Orchestrator<T> {
    transport: T,
}

impl<T: HttpTransport> Orchestrator<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes all definitions and returns the accumulated records.
    ///
    /// A convenience over [`Orchestrator::run_into`] for callers that only
    /// want complete runs: on failure the records produced so far are
    /// dropped with the store. Callers that must keep partial output (as the
    /// CLI reports it) call `run_into` with their own buffers, which still
    /// hold every record appended before the failing request.
    pub async fn run(&self, apis: &[ApiDefinition]) -> Result<Vec<Record>, PipelineError> {
        let mut store = ResultStore::new();
        let mut records = Vec::new();
        self.run_into(apis, &mut store, &mut records).await?;
        Ok(records)
    }

    /// Executes all definitions, appending records and stored results as it goes.
    pub async fn run_into(
        &self,
        apis: &[ApiDefinition],
        store: &mut ResultStore,
        records: &mut Vec<Record>,
    ) -> Result<(), PipelineError> {
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        log::info!("[{}] Starting run of {} APIs", run_id, apis.len());

        for api in apis {
            let produced = self.execute(api, store, records).await?;
            log::info!("[{}] API '{}' produced {} records", run_id, api.id, produced);
        }

        log::info!(
            "[{}] Run finished: {} records in {:?}",
            run_id,
            records.len(),
            start_time.elapsed()
        );
        Ok(())
    }

    /// Executes one definition and returns how many records it produced.
    pub async fn execute(
        &self,
        api: &ApiDefinition,
        store: &mut ResultStore,
        records: &mut Vec<Record>,
    ) -> Result<usize, PipelineError> {
        let plan = plan_requests(api, store);
        let fan_out = plan.is_fan_out();
        let mut produced = 0;

        for (index, request) in plan.requests().iter().enumerate() {
            log::debug!("{} {} ({})", request.method, request.url, api.id);

            let response = self
                .transport
                .send(request)
                .await
                .map_err(|source| PipelineError::Request {
                    api_id: api.id.clone(),
                    iteration: fan_out.then_some(index),
                    source,
                })?;

            log::debug!(
                "{} {} answered {} in {:?}",
                request.method,
                request.url,
                response.status_code,
                response.duration
            );

            if store.insert_if_absent(&api.id, &response.body) {
                log::debug!("Stored result of '{}'", api.id);
            }

            let mapped = map_items(response.data(), &api.mapping);
            produced += mapped.len();
            records.extend(mapped);
        }

        Ok(produced)
    }
}

/// Runs `config` over the network and returns the records.
pub async fn harvest(config: &PipelineConfig) -> Result<Vec<Record>, PipelineError> {
    let transport = ReqwestTransport::new(&config.execution).map_err(PipelineError::Client)?;
    Orchestrator::new(transport).run(&config.apis).await
}
