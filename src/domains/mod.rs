//! Domains module containing business logic organized by bounded contexts.
//!
//! - **dq**: client for the Collibra Data Quality REST API
//! - **tools**: MCP tools built on top of that client

pub mod dq;
pub mod tools;
