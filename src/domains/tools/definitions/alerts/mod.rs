//! Alert tools: list and create alerts on a dataset.

pub mod get_alerts;
pub mod save_alert;

pub use get_alerts::{GetAlertsParams, GetAlertsTool};
pub use save_alert::{SaveAlertParams, SaveAlertTool};
