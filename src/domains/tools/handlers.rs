//! Tool handlers module.
//!
//! Every tool implements [`DqTool`]. The generic [`dispatch`] and [`route`]
//! functions give both transports the same call path: deserialize the
//! arguments, run the tool, and wrap the outcome in a [`ToolOutput`]
//! envelope. Argument errors never become protocol errors; they come back as
//! tool results with `kind: "validation"`.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{error, info, warn};

use super::ToolError;
use crate::domains::dq::DqApi;

/// Why a tool call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Arguments were missing or malformed; nothing was sent upstream.
    Validation,
    /// The DQ service failed, was unreachable, or answered unexpectedly.
    Upstream,
    /// A bug on this side.
    Internal,
}

/// Result envelope returned by every tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the execution was successful.
    pub success: bool,

    /// Number of records in `data`, for list results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Informational message, e.g. for empty results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The result data from the tool.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    /// Error message if execution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Failure category if execution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,

    /// Human-readable rendering used as the text content instead of the JSON envelope.
    #[serde(skip)]
    pub display: Option<String>,
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data,
            error: None,
            kind: None,
            display: None,
        }
    }

    /// Create a failed tool output.
    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            message: None,
            data: Value::Null,
            error: Some(error.into()),
            kind: Some(kind),
            display: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Convert into the MCP result: the envelope goes into `structuredContent`,
    /// the text content is `display` or the envelope JSON.
    pub fn into_call_result(self) -> CallToolResult {
        let structured = match serde_json::to_value(&self) {
            Ok(structured) => structured,
            Err(e) => {
                error!("Failed to serialize tool output: {}", e);
                let err = ToolError::internal(format!("failed to serialize tool output: {}", e));
                return ToolOutput::from(err).into_call_result();
            }
        };
        let text = match &self.display {
            Some(display) => display.clone(),
            None => structured.to_string(),
        };

        let mut result = if self.success {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        };
        result.structured_content = Some(structured);
        result
    }
}

impl ToolError {
    /// Map this error onto the failure category reported to clients.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidArguments(_) | Self::NotFound(_) => FailureKind::Validation,
            Self::Upstream { .. } | Self::MalformedResponse(_) => FailureKind::Upstream,
            Self::Internal(_) => FailureKind::Internal,
        }
    }
}

impl From<ToolError> for ToolOutput {
    fn from(err: ToolError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A DQ tool: a name, a description, a parameter schema and a single async
/// operation against the DQ API.
#[async_trait::async_trait]
pub trait DqTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Validate the arguments and perform the operation.
    async fn run(params: Self::Params, api: &dyn DqApi) -> Result<ToolOutput, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Deserialize tool arguments. `null` is treated as an empty object.
pub fn parse_params<P: DeserializeOwned>(arguments: Value) -> Result<P, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Run tool `T` with raw JSON arguments and produce the MCP result.
pub async fn dispatch<T: DqTool>(arguments: Value, api: &dyn DqApi) -> CallToolResult {
    info!("Tool called: {}", T::NAME);

    let outcome = match parse_params::<T::Params>(arguments) {
        Ok(params) => T::run(params, api).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(output) => output.into_call_result(),
        Err(e) => {
            match e.kind() {
                FailureKind::Validation => warn!("{} rejected: {}", T::NAME, e),
                _ => error!("{} failed: {}", T::NAME, e),
            }
            ToolOutput::from(e).into_call_result()
        }
    }
}

/// Create a ToolRoute for tool `T` (STDIO transport).
pub fn route<T, S>(api: Arc<dyn DqApi>) -> ToolRoute<S>
where
    T: DqTool,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(T::to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let arguments = Value::Object(ctx.arguments.clone().unwrap_or_default());
        let api = api.clone();
        async move { Ok::<_, McpError>(dispatch::<T>(arguments, api.as_ref()).await) }.boxed()
    })
}
