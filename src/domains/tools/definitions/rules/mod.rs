//! Rule tools: list and create SQL rules on a dataset.

pub mod get_rules;
pub mod save_rule;

pub use get_rules::{GetRulesByDatasetParams, GetRulesByDatasetTool, RuleSummary};
pub use save_rule::{FIXED_PERC, FIXED_POINTS, SaveRuleParams, SaveRuleTool};
