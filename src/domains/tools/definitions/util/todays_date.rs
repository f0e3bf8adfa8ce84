//! Today's local date, for building run ids.

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::domains::dq::DqApi;
use crate::domains::tools::{DqTool, NoParams, ToolError, ToolOutput};

#[derive(Debug, Clone)]
pub struct GetTodaysDateTool;

#[async_trait]
impl DqTool for GetTodaysDateTool {
    const NAME: &'static str = "get_todays_date";

    const DESCRIPTION: &'static str =
        "Get today's date in YYYY-MM-DD format. Useful as a run_id for run_dq_job.";

    type Params = NoParams;

    async fn run(_params: NoParams, _api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        Ok(ToolOutput::success(Value::String(today.clone())).with_display(today))
    }
}
