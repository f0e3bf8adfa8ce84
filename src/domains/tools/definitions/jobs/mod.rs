//! DQ job tools: submit jobs, watch the queue, read results.

pub mod hoot;
pub mod queue;
pub mod recent_runs;
pub mod run_dq_job;

pub use hoot::{GetHootResultsParams, GetHootResultsTool};
pub use queue::{GetJobsInQueueParams, GetJobsInQueueTool};
pub use recent_runs::GetRecentRunsTool;
pub use run_dq_job::{RunDqJobParams, RunDqJobTool};
