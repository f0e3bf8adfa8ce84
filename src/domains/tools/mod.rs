//! Tools domain module.
//!
//! Tools are the operations MCP clients call. Each one maps its arguments to
//! requests against the DQ API and maps the response back to a
//! [`ToolOutput`] envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `DqTool` trait, the result envelope, and the shared
//!   call path used by both transports
//! - `router.rs` - rmcp ToolRouter builder for STDIO transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `DqTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a route in `router.rs`
//! 4. Register it in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
