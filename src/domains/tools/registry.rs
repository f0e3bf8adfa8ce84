//! Tool Registry - central registration and dispatch for all tools.
//!
//! The HTTP transport lists and calls tools through the registry; the stdio
//! transport goes through the rmcp router built in [`super::router`]. Both
//! end up in the same [`dispatch`] call.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use tracing::warn;

use crate::domains::dq::DqApi;

use super::definitions::{
    GetAlertsTool, GetDatasetDefinitionTool, GetHootResultsTool, GetJobsInQueueTool,
    GetRecentRunsTool, GetRulesByDatasetTool, GetTodaysDateTool, RunDqJobTool, RunSqlTool,
    SaveAlertTool, SaveRuleTool, SearchCatalogTool,
};
use super::{DqTool, ToolError, dispatch};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    api: Arc<dyn DqApi>,
}

impl ToolRegistry {
    /// Create a new tool registry bound to a DQ API.
    pub fn new(api: Arc<dyn DqApi>) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            RunDqJobTool::NAME,
            GetRecentRunsTool::NAME,
            GetJobsInQueueTool::NAME,
            GetHootResultsTool::NAME,
            RunSqlTool::NAME,
            SearchCatalogTool::NAME,
            GetRulesByDatasetTool::NAME,
            SaveRuleTool::NAME,
            GetDatasetDefinitionTool::NAME,
            GetAlertsTool::NAME,
            SaveAlertTool::NAME,
            GetTodaysDateTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            RunDqJobTool::to_tool(),
            GetRecentRunsTool::to_tool(),
            GetJobsInQueueTool::to_tool(),
            GetHootResultsTool::to_tool(),
            RunSqlTool::to_tool(),
            SearchCatalogTool::to_tool(),
            GetRulesByDatasetTool::to_tool(),
            SaveRuleTool::to_tool(),
            GetDatasetDefinitionTool::to_tool(),
            GetAlertsTool::to_tool(),
            SaveAlertTool::to_tool(),
            GetTodaysDateTool::to_tool(),
        ]
    }

    /// Call a tool by name.
    ///
    /// Only an unknown name is an error; every failure inside a tool is
    /// reported in the returned result.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ToolError> {
        let api = self.api.as_ref();
        let result = match name {
            RunDqJobTool::NAME => dispatch::<RunDqJobTool>(arguments, api).await,
            GetRecentRunsTool::NAME => dispatch::<GetRecentRunsTool>(arguments, api).await,
            GetJobsInQueueTool::NAME => dispatch::<GetJobsInQueueTool>(arguments, api).await,
            GetHootResultsTool::NAME => dispatch::<GetHootResultsTool>(arguments, api).await,
            RunSqlTool::NAME => dispatch::<RunSqlTool>(arguments, api).await,
            SearchCatalogTool::NAME => dispatch::<SearchCatalogTool>(arguments, api).await,
            GetRulesByDatasetTool::NAME => {
                dispatch::<GetRulesByDatasetTool>(arguments, api).await
            }
            SaveRuleTool::NAME => dispatch::<SaveRuleTool>(arguments, api).await,
            GetDatasetDefinitionTool::NAME => {
                dispatch::<GetDatasetDefinitionTool>(arguments, api).await
            }
            GetAlertsTool::NAME => dispatch::<GetAlertsTool>(arguments, api).await,
            SaveAlertTool::NAME => dispatch::<SaveAlertTool>(arguments, api).await,
            GetTodaysDateTool::NAME => dispatch::<GetTodaysDateTool>(arguments, api).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };
        Ok(result)
    }
}
