//! Recent DQ job runs.

use async_trait::async_trait;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::{DqTool, NoParams, ToolError, ToolOutput};

#[derive(Debug, Clone)]
pub struct GetRecentRunsTool;

#[async_trait]
impl DqTool for GetRecentRunsTool {
    const NAME: &'static str = "get_recent_runs";

    const DESCRIPTION: &'static str =
        "Get recent DQ job runs. Returns a list of recently executed data quality jobs.";

    type Params = NoParams;

    async fn run(_params: NoParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        let runs = api.send(ApiRequest::get("/v2/getrecentruns")).await?;
        Ok(ToolOutput::success(runs))
    }
}
