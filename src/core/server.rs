//! MCP Server implementation and lifecycle management.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool implements `DqTool`: a parameters struct (for the input schema)
//! and an async `run()` against the DQ API.
//!
//! The stdio transport calls tools through the rmcp `ToolRouter` built in
//! `domains/tools/router.rs`; the HTTP transport goes through `ToolRegistry`.
//! Both reach the same `dispatch()`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use crate::domains::dq::{DqApi, DqClient};
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// Instructions sent to clients in the `initialize` response.
pub const SERVER_INSTRUCTIONS: &str = "Tools for Collibra Data Quality. \
    Use get_todays_date for a run_id, run_dq_job to register and run a dataset, \
    then get_hoot_results with the same dataset and run_id to read the findings. \
    Rules and alerts are attached to a dataset by name.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and owns the
/// DQ API every tool talks to.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// DQ API shared by all tools.
    api: Arc<dyn DqApi>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the DQ service described in `config`.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let client = DqClient::new(config.dq.clone())?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server over an existing DQ API.
    pub fn with_api(config: Config, api: Arc<dyn DqApi>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(api.clone()),
            config: Arc::new(config),
            api,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// DQ connection every tool operates against.
    pub fn connection(&self) -> &str {
        self.api.connection()
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ToolError> {
        info!("Calling tool over HTTP");
        ToolRegistry::new(self.api.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    #[instrument(skip(self))]
    fn get_info(&self) -> ServerInfo {
        debug!("Reporting server info");
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
