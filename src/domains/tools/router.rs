//! Tool Router - builds the rmcp ToolRouter used by the stdio transport.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::dq::DqApi;

use super::definitions::{
    GetAlertsTool, GetDatasetDefinitionTool, GetHootResultsTool, GetJobsInQueueTool,
    GetRecentRunsTool, GetRulesByDatasetTool, GetTodaysDateTool, RunDqJobTool, RunSqlTool,
    SaveAlertTool, SaveRuleTool, SearchCatalogTool,
};
use super::route;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn DqApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(route::<RunDqJobTool, S>(api.clone()))
        .with_route(route::<GetRecentRunsTool, S>(api.clone()))
        .with_route(route::<GetJobsInQueueTool, S>(api.clone()))
        .with_route(route::<GetHootResultsTool, S>(api.clone()))
        .with_route(route::<RunSqlTool, S>(api.clone()))
        .with_route(route::<SearchCatalogTool, S>(api.clone()))
        .with_route(route::<GetRulesByDatasetTool, S>(api.clone()))
        .with_route(route::<SaveRuleTool, S>(api.clone()))
        .with_route(route::<GetDatasetDefinitionTool, S>(api.clone()))
        .with_route(route::<GetAlertsTool, S>(api.clone()))
        .with_route(route::<SaveAlertTool, S>(api.clone()))
        .with_route(route::<GetTodaysDateTool, S>(api))
}
