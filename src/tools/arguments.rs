//! Typed access to tool call arguments.

use crate::error::AssistantError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, AssistantError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AssistantError::InvalidArgument(format!("Missing string argument: {key}")))
    }
}
