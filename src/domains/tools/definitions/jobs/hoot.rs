//! Results ("hoot") of a single DQ run.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `get_hoot_results`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetHootResultsParams {
    #[schemars(description = "Dataset name")]
    pub dataset: String,

    #[schemars(description = "Run ID (typically a date like '2025-01-23')")]
    pub run_id: String,
}

#[derive(Debug, Clone)]
pub struct GetHootResultsTool;

#[async_trait]
impl DqTool for GetHootResultsTool {
    const NAME: &'static str = "get_hoot_results";

    const DESCRIPTION: &'static str = "Get DQ job results (hoot) for a specific dataset run. \
         Returns detailed quality results including scores and rule findings.";

    type Params = GetHootResultsParams;

    async fn run(params: GetHootResultsParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;
        require_non_empty("run_id", &params.run_id)?;

        let hoot = api
            .send(
                ApiRequest::get("/v2/gethoot")
                    .query("dataset", params.dataset)
                    .query("runId", params.run_id),
            )
            .await?;

        Ok(ToolOutput::success(hoot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dq::mock::MockApi;
    use crate::domains::tools::definitions::RunDqJobTool;
    use crate::domains::tools::dispatch;
    use serde_json::json;

    #[tokio::test]
    async fn test_results_scoped_to_submitted_run() {
        let api = MockApi::new().ok(
            "/v2/gethoot",
            json!({ "dataset": "d1", "runId": "r1", "score": 98 }),
        );

        dispatch::<RunDqJobTool>(
            json!({ "dataset": "d1", "run_id": "r1", "sql": "SELECT 1" }),
            &api,
        )
        .await;
        let result =
            dispatch::<GetHootResultsTool>(json!({ "dataset": "d1", "run_id": "r1" }), &api).await;

        assert_eq!(result.structured_content.unwrap()["data"]["score"], 98);
        let calls = api.calls();
        let hoot = calls.last().unwrap();
        assert_eq!(hoot.path(), "/v2/gethoot");
        assert_eq!(
            hoot.query,
            vec![
                ("dataset".to_string(), "d1".to_string()),
                ("runId".to_string(), "r1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_requires_dataset_and_run_id() {
        let api = MockApi::new();
        let result = dispatch::<GetHootResultsTool>(json!({ "dataset": "d1" }), &api).await;
        assert_eq!(result.structured_content.unwrap()["kind"], "validation");
        let result =
            dispatch::<GetHootResultsTool>(json!({ "dataset": "", "run_id": "r1" }), &api).await;
        assert_eq!(result.structured_content.unwrap()["kind"], "validation");
        assert_eq!(api.call_count(), 0);
    }
}
