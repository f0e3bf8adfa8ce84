//! Ad-hoc SQL against the configured connection.

pub mod run_sql;

pub use run_sql::{MAX_DISPLAY_ROWS, RunSqlParams, RunSqlTool};
