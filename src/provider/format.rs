//! Provider formatting helpers.

use serde_json::Value;

/// Convert a tool result JSON value into a string payload for providers.
pub(crate) fn tool_result_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
