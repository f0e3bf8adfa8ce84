//! Error types and handling for the MCP server.
//!
//! Startup errors: invalid configuration or a DQ client that cannot be
//! built. Tool failures never reach this type; they are reported to the
//! client as tool results. Transports have their own `TransportError`.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the DQ client.
    #[error("DQ client error: {0}")]
    Dq(#[from] crate::domains::dq::DqError),

    /// Configuration-related errors. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
