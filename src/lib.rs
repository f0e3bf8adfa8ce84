//! Collibra Data Quality MCP Server Library
//!
//! An MCP server exposing a fixed set of tools that forward to a Collibra
//! Data Quality (CDQ) deployment: run DQ jobs, inspect results, query SQL,
//! search the catalog and manage rules and alerts.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the main server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **dq**: authenticated client for the CDQ REST API
//!   - **tools**: the MCP tools, one file per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use cdq_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
