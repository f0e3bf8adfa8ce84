//! Collibra DQ domain.
//!
//! Everything that talks to the DQ REST API lives here. Tools depend only on
//! the [`DqApi`] trait; [`DqClient`] is the reqwest implementation used in
//! production.
//!
//! - `api.rs` - the `DqApi` seam and the `ApiRequest` description
//! - `client.rs` - sign-in, bearer-token reuse and request execution
//! - `error.rs` - upstream failure taxonomy

mod api;
mod client;
mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{ApiRequest, DqApi};
pub use client::DqClient;
pub use error::DqError;
