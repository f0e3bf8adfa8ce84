//! Rules attached to a dataset.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::{json_type, require_non_empty};
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `get_rules_by_dataset`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRulesByDatasetParams {
    #[schemars(description = "The dataset name (e.g. 'samples.austin_311')")]
    pub dataset: String,
}

/// The fields of a DQ rule that matter to callers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RuleSummary {
    #[serde(rename = "ruleNm")]
    pub name: Option<String>,
    #[serde(rename = "ruleValue")]
    pub sql: Option<String>,
    #[serde(rename = "ruleType")]
    pub rule_type: Option<String>,
    pub points: Option<Value>,
}

impl RuleSummary {
    fn to_output(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "sql": self.sql,
            "type": self.rule_type,
            "points": self.points,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GetRulesByDatasetTool;

#[async_trait]
impl DqTool for GetRulesByDatasetTool {
    const NAME: &'static str = "get_rules_by_dataset";

    const DESCRIPTION: &'static str = "Get all data quality rules for a dataset. \
         Returns each rule's name, SQL definition, type and points.";

    type Params = GetRulesByDatasetParams;

    async fn run(params: GetRulesByDatasetParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;

        let body = api
            .send(ApiRequest::get("/v3/rules").segment(params.dataset.as_str()))
            .await?;

        let rules: Vec<RuleSummary> = match body {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()
                .map_err(|e| ToolError::malformed(e.to_string()))?,
            other => {
                return Err(ToolError::malformed(format!(
                    "expected a list of rules, got {}",
                    json_type(&other)
                )));
            }
        };

        if rules.is_empty() {
            return Ok(ToolOutput::success(Value::Null)
                .with_message(format!("No rules found for dataset: {}", params.dataset)));
        }

        let formatted: Vec<Value> = rules.iter().map(RuleSummary::to_output).collect();
        let count = formatted.len();
        Ok(ToolOutput::success(Value::Array(formatted)).with_count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dq::mock::MockApi;
    use crate::domains::tools::dispatch;
    use serde_json::json;

    #[tokio::test]
    async fn test_formats_rules() {
        let api = MockApi::new().ok(
            "/v3/rules/samples.austin_311",
            json!([{
                "ruleNm": "no_null_ids",
                "ruleValue": "SELECT * FROM @dataset WHERE id IS NULL",
                "ruleType": "SQLF",
                "points": 1,
                "ruleRepo": ""
            }]),
        );
        let result = dispatch::<GetRulesByDatasetTool>(
            json!({ "dataset": "samples.austin_311" }),
            &api,
        )
        .await;

        let structured = result.structured_content.unwrap();
        assert_eq!(
            structured["data"],
            json!([{
                "name": "no_null_ids",
                "sql": "SELECT * FROM @dataset WHERE id IS NULL",
                "type": "SQLF",
                "points": 1
            }])
        );
        assert_eq!(api.calls()[0].segments, vec!["v3", "rules", "samples.austin_311"]);
    }

    #[tokio::test]
    async fn test_no_rules_message() {
        let api = MockApi::new().ok("/v3/rules/d1", json!([]));
        let result = dispatch::<GetRulesByDatasetTool>(json!({ "dataset": "d1" }), &api).await;

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["success"], true);
        assert_eq!(structured["message"], "No rules found for dataset: d1");
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_upstream_failure() {
        let api = MockApi::new().ok("/v3/rules/d1", json!({ "error": "nope" }));
        let result = dispatch::<GetRulesByDatasetTool>(json!({ "dataset": "d1" }), &api).await;
        assert_eq!(result.structured_content.unwrap()["kind"], "upstream");
    }

    #[tokio::test]
    async fn test_dataset_required() {
        let api = MockApi::new();
        for args in [json!({ "dataset": "" }), json!({ "dataset": "  " }), json!({})] {
            let result = dispatch::<GetRulesByDatasetTool>(args, &api).await;
            assert_eq!(result.structured_content.unwrap()["kind"], "validation");
        }
        assert_eq!(api.call_count(), 0);
    }
}
