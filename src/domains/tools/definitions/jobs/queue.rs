//! Jobs waiting in or moving through the DQ check queue.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::{default_queue_limit, records_at, require_positive};
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `get_jobs_in_queue`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetJobsInQueueParams {
    #[schemars(description = "Maximum jobs to return (default: 10)")]
    #[serde(default = "default_queue_limit")]
    pub limit: u32,

    #[schemars(description = "Filter by job status (empty for all)")]
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct GetJobsInQueueTool;

#[async_trait]
impl DqTool for GetJobsInQueueTool {
    const NAME: &'static str = "get_jobs_in_queue";

    const DESCRIPTION: &'static str = "Get DQ jobs currently in the queue. \
         Returns at most `limit` jobs with their dataset, runId and status.";

    type Params = GetJobsInQueueParams;

    async fn run(params: GetJobsInQueueParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_positive("limit", params.limit)?;

        let body = api
            .send(
                ApiRequest::get("/v2/getowlcheckq")
                    .query("jobStatus", params.status.trim())
                    .query("limit", params.limit.to_string()),
            )
            .await?;

        let jobs: Vec<Value> = records_at(&body, "data")?
            .iter()
            .take(params.limit as usize)
            .map(|job| {
                json!({
                    "dataset": job.get("dataset"),
                    "runId": job.get("runId"),
                    "status": job.get("status"),
                })
            })
            .collect();

        let count = jobs.len();
        Ok(ToolOutput::success(Value::Array(jobs)).with_count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dq::mock::MockApi;
    use crate::domains::tools::dispatch;

    fn queue_of(n: usize) -> Value {
        let jobs: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "dataset": format!("d{}", i),
                    "runId": "2025-01-23",
                    "status": "QUEUED",
                    "agentId": 7
                })
            })
            .collect();
        json!({ "data": jobs })
    }

    #[tokio::test]
    async fn test_never_returns_more_than_limit() {
        let api = MockApi::new().ok("/v2/getowlcheckq", queue_of(12));
        let result = dispatch::<GetJobsInQueueTool>(json!({ "limit": 5 }), &api).await;

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 5);
        let jobs = structured["data"].as_array().unwrap();
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[0], json!({ "dataset": "d0", "runId": "2025-01-23", "status": "QUEUED" }));

        let call = &api.calls()[0];
        assert_eq!(call.query_value("limit"), Some("5"));
        assert_eq!(call.query_value("jobStatus"), Some(""));
    }

    #[tokio::test]
    async fn test_defaults_and_status_filter() {
        let api = MockApi::new().ok("/v2/getowlcheckq", queue_of(3));
        let result = dispatch::<GetJobsInQueueTool>(json!({ "status": "RUNNING" }), &api).await;

        assert_eq!(result.structured_content.unwrap()["count"], 3);
        let call = &api.calls()[0];
        assert_eq!(call.query_value("limit"), Some("10"));
        assert_eq!(call.query_value("jobStatus"), Some("RUNNING"));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_limit() {
        let api = MockApi::new();
        for limit in [json!(0), json!(-1), json!("ten")] {
            let result = dispatch::<GetJobsInQueueTool>(json!({ "limit": limit }), &api).await;
            assert_eq!(result.structured_content.unwrap()["kind"], "validation");
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_queue_body() {
        let api = MockApi::new().ok("/v2/getowlcheckq", json!({ "data": "oops" }));
        let result = dispatch::<GetJobsInQueueTool>(json!({}), &api).await;
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["kind"], "upstream");
        assert!(structured["error"].as_str().unwrap().starts_with("Failed to parse response"));
    }

    #[tokio::test]
    async fn test_non_object_body_is_upstream_failure() {
        for body in [
            json!([{ "dataset": "d1", "runId": "r1", "status": "QUEUED" }]),
            json!("maintenance"),
            json!(42),
        ] {
            let api = MockApi::new().ok("/v2/getowlcheckq", body);
            let result = dispatch::<GetJobsInQueueTool>(json!({}), &api).await;
            let structured = result.structured_content.unwrap();
            assert_eq!(structured["success"], false);
            assert_eq!(structured["kind"], "upstream");
        }
    }
}
