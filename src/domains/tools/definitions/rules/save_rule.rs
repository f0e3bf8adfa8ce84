//! Create a SQL rule on a dataset.
//!
//! Rules are always scored as absolute points: `points = 1`, `perc = 1`.
//! Percentage-threshold scoring is not supported, so other values are
//! rejected instead of being replaced.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Point value submitted with every rule.
pub const FIXED_POINTS: i64 = 1;

/// Percentage value submitted with every rule.
pub const FIXED_PERC: i64 = 1;

/// Rule type for "SQL freeform" rules: rows returned by the query are breaks.
const RULE_TYPE: &str = "SQLF";

/// Parameters for `save_rule`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SaveRuleParams {
    #[schemars(description = "Dataset name to attach the rule to")]
    pub dataset: String,

    #[schemars(description = "Name for the rule")]
    pub rule_name: String,

    #[schemars(description = "SQL query that defines the rule (records returned = failures)")]
    pub rule_sql: String,

    #[schemars(description = "Point value for the rule; only 1 is supported")]
    #[serde(default)]
    pub points: Option<i64>,

    #[schemars(description = "Percentage setting for the rule; only 1 is supported")]
    #[serde(default)]
    pub perc: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SaveRuleTool;

fn require_fixed(field: &str, value: Option<i64>, fixed: i64) -> Result<(), ToolError> {
    match value {
        Some(v) if v != fixed => Err(ToolError::invalid_arguments(format!(
            "'{}' must be {}; rules are scored as absolute points",
            field, fixed
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl DqTool for SaveRuleTool {
    const NAME: &'static str = "save_rule";

    const DESCRIPTION: &'static str = "Create a new data quality rule for a dataset. \
         The rule SQL returns the failing records. Rules are scored as absolute points \
         (points=1, perc=1).";

    type Params = SaveRuleParams;

    async fn run(params: SaveRuleParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;
        require_non_empty("rule_name", &params.rule_name)?;
        require_non_empty("rule_sql", &params.rule_sql)?;
        require_fixed("points", params.points, FIXED_POINTS)?;
        require_fixed("perc", params.perc, FIXED_PERC)?;

        info!("Saving rule {} on {}", params.rule_name, params.dataset);

        let rule = json!({
            "dataset": params.dataset,
            "ruleNm": params.rule_name,
            "ruleType": RULE_TYPE,
            "ruleValue": params.rule_sql,
            "points": FIXED_POINTS,
            "ruleRepo": "",
            "perc": FIXED_PERC,
            "columnName": "",
            "businessCategory": "",
            "businessDesc": "",
            "dimId": Value::Null,
        });

        let created = api.send(ApiRequest::post("/v3/rules").json(rule)).await?;
        Ok(ToolOutput::success(created))
    }
}
