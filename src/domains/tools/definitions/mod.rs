//! Tool definitions module.
//!
//! One file per tool, grouped by the part of the DQ API they cover.

pub mod alerts;
pub mod catalog;
pub mod common;
pub mod jobs;
pub mod rules;
pub mod sql;
pub mod util;

pub use alerts::{GetAlertsTool, SaveAlertTool};
pub use catalog::{GetDatasetDefinitionTool, SearchCatalogTool};
pub use jobs::{GetHootResultsTool, GetJobsInQueueTool, GetRecentRunsTool, RunDqJobTool};
pub use rules::{GetRulesByDatasetTool, SaveRuleTool};
pub use sql::RunSqlTool;
pub use util::GetTodaysDateTool;
