//! Local utilities that never call the DQ service.

pub mod todays_date;

pub use todays_date::GetTodaysDateTool;
