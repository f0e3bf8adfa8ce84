//! Argument checks and response helpers shared by the DQ tools.

use serde_json::Value;

use crate::domains::tools::ToolError;

/// Reject empty or whitespace-only required strings.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

/// Reject a zero limit. Negative values never get this far.
pub fn require_positive(field: &str, value: u32) -> Result<(), ToolError> {
    if value == 0 {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must be a positive integer",
            field
        )));
    }
    Ok(())
}

/// Take the array stored under `key` in `body`.
///
/// `body` must be an object, or `null` for an empty response. Within the
/// object a missing key or `null` yields an empty list; anything else that
/// is not an array is a malformed response.
pub fn records_at(body: &Value, key: &str) -> Result<Vec<Value>, ToolError> {
    let fields = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(ToolError::malformed(format!(
                "expected an object holding '{}', got {}",
                key,
                json_type(other)
            )));
        }
    };

    match fields.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(ToolError::malformed(format!(
            "expected '{}' to be a list, got {}",
            key,
            json_type(other)
        ))),
    }
}

/// Short JSON type name for error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Default limit for queue listings.
pub fn default_queue_limit() -> u32 {
    10
}

/// Default limit for catalog searches.
pub fn default_search_limit() -> u32 {
    50
}
