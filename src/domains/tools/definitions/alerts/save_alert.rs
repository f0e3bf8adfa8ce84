//! Create an e-mail alert on a dataset.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `save_alert`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SaveAlertParams {
    #[schemars(description = "Dataset name")]
    pub dataset: String,

    #[schemars(description = "Name for the alert")]
    pub alert_name: String,

    #[schemars(description = "Alert condition expression (e.g. 'score < 75')")]
    pub condition: String,

    #[schemars(description = "Email address to send alerts to")]
    pub email: String,

    /// Empty means "<condition> for <dataset>".
    #[schemars(description = "Custom alert message (optional)")]
    #[serde(default)]
    pub message: String,
}

impl SaveAlertParams {
    fn alert_message(&self) -> String {
        if self.message.trim().is_empty() {
            format!("{} for {}", self.condition, self.dataset)
        } else {
            self.message.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveAlertTool;

#[async_trait]
impl DqTool for SaveAlertTool {
    const NAME: &'static str = "save_alert";

    const DESCRIPTION: &'static str = "Create a new alert for a dataset. \
         When the condition holds after a run, an e-mail is sent to the given address.";

    type Params = SaveAlertParams;

    async fn run(params: SaveAlertParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;
        require_non_empty("alert_name", &params.alert_name)?;
        require_non_empty("condition", &params.condition)?;
        require_non_empty("email", &params.email)?;
        if !params.email.contains('@') {
            return Err(ToolError::invalid_arguments(format!(
                "'email' is not an e-mail address: {}",
                params.email
            )));
        }

        info!("Saving alert {} on {}", params.alert_name, params.dataset);

        let alert = json!({
            "dataset": params.dataset,
            "alertNm": params.alert_name,
            "alertCond": params.condition,
            "alertFormat": "EMAIL",
            "alertFormatValue": params.email,
            "alertMsg": params.alert_message(),
            "batchName": "",
            "addRuleDetails": true,
            "active": true,
            "alertTypes": ["CONDITION"],
        });

        let created = api.send(ApiRequest::post("/v3/alerts").json(alert)).await?;
        Ok(ToolOutput::success(created))
    }
}
