//! Register a pushdown dataset definition and start a DQ job for it.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `run_dq_job`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunDqJobParams {
    #[schemars(description = "Dataset name (e.g. 'my_project.my_table')")]
    pub dataset: String,

    /// Caller-chosen, should be unique per dataset.
    #[schemars(description = "Run ID, typically a date (e.g. '2025-01-23')")]
    pub run_id: String,

    #[schemars(description = "Source SQL query for the dataset")]
    pub sql: String,
}

#[derive(Debug, Clone)]
pub struct RunDqJobTool;

#[async_trait]
impl DqTool for RunDqJobTool {
    const NAME: &'static str = "run_dq_job";

    const DESCRIPTION: &'static str = "Register a dataset definition and run a DQ job. \
         The SQL runs as a pushdown query on the configured connection. \
         Returns the job descriptor from the DQ service.";

    type Params = RunDqJobParams;

    async fn run(params: RunDqJobParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;
        require_non_empty("run_id", &params.run_id)?;
        require_non_empty("sql", &params.sql)?;

        info!(
            "Registering dataset {} for run {} on {}",
            params.dataset,
            params.run_id,
            api.connection()
        );

        let definition = json!({
            "dataset": params.dataset,
            "runId": params.run_id,
            "pushdown": {
                "sourceQuery": params.sql,
                "connectionName": api.connection(),
            },
            "agentId": { "id": 0 },
            "profile": { "on": false },
        });
        api.send(ApiRequest::put("/v3/datasetDefs").json(definition))
            .await
            .map_err(|e| ToolError::upstream("Registration failed", e))?;

        let job = api
            .send(
                ApiRequest::post("/v3/jobs/run")
                    .query("dataset", params.dataset.as_str())
                    .query("runDate", params.run_id.as_str()),
            )
            .await?;

        Ok(ToolOutput::success(job))
    }
}
