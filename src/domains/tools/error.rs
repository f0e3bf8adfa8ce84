//! Tool-specific error types.

use thiserror::Error;

use crate::domains::dq::DqError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool. No upstream call was made.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The DQ service failed or rejected the request.
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: DqError,
    },

    /// The DQ service answered with a body of an unexpected shape.
    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Wrap an upstream failure with a short description of the step that failed.
    pub fn upstream(context: impl Into<String>, source: DqError) -> Self {
        Self::Upstream {
            context: context.into(),
            source,
        }
    }

    /// Create a new "malformed response" error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<DqError> for ToolError {
    fn from(source: DqError) -> Self {
        Self::upstream("DQ API request failed", source)
    }
}
