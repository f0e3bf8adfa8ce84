//! Alerts configured on a dataset.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `get_alerts`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAlertsParams {
    #[schemars(description = "Dataset name")]
    pub dataset: String,
}

#[derive(Debug, Clone)]
pub struct GetAlertsTool;

#[async_trait]
impl DqTool for GetAlertsTool {
    const NAME: &'static str = "get_alerts";

    const DESCRIPTION: &'static str =
        "Get all alerts configured for a dataset, with their conditions and settings.";

    type Params = GetAlertsParams;

    async fn run(params: GetAlertsParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;

        let alerts = api
            .send(ApiRequest::get("/v2/getalerts").query("dataset", params.dataset))
            .await?;

        Ok(ToolOutput::success(alerts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dq::mock::MockApi;
    use crate::domains::tools::dispatch;
    use serde_json::json;

    #[tokio::test]
    async fn test_lists_alerts() {
        let api = MockApi::new().ok(
            "/v2/getalerts",
            json!([{ "alertNm": "low_score", "alertCond": "score < 75" }]),
        );
        let result = dispatch::<GetAlertsTool>(json!({ "dataset": "d1" }), &api).await;
        assert_eq!(result.structured_content.unwrap()["data"][0]["alertNm"], "low_score");
        assert_eq!(api.calls()[0].query_value("dataset"), Some("d1"));
    }

    #[tokio::test]
    async fn test_upstream_500_does_not_look_like_validation() {
        let api = MockApi::new().server_error("/v2/getalerts");
        let result = dispatch::<GetAlertsTool>(json!({ "dataset": "d1" }), &api).await;
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["kind"], "upstream");
        assert!(structured["error"].as_str().unwrap().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_dataset_required() {
        let api = MockApi::new();
        for args in [json!({ "dataset": "" }), json!({})] {
            let result = dispatch::<GetAlertsTool>(args, &api).await;
            assert_eq!(result.structured_content.unwrap()["kind"], "validation");
        }
        assert_eq!(api.call_count(), 0);
    }
}
