//! Message types for model communication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMessage {
    pub role: Role,
    pub content: Vec<ContentPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ModelMessage {
    fn with_parts(role: Role, content: Vec<ContentPart>) -> Self {
        Self {
            role,
            content,
            name: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_parts(Role::System, vec![ContentPart::Text { text: text.into() }])
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_parts(Role::User, vec![ContentPart::Text { text: text.into() }])
    }

    /// Create an assistant message carrying tool calls (and optional text).
    pub fn assistant_tool_calls(text: &str, calls: &[AgentToolCall]) -> Self {
        let mut content = Vec::with_capacity(calls.len() + 1);
        if !text.is_empty() {
            content.push(ContentPart::Text {
                text: text.to_string(),
            });
        }
        content.extend(calls.iter().cloned().map(ContentPart::ToolCall));
        Self::with_parts(Role::Assistant, content)
    }

    /// Create a tool result message.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        result: serde_json::Value,
        is_error: bool,
    ) -> Self {
        Self::with_parts(
            Role::Tool,
            vec![ContentPart::ToolResult(AgentToolResult {
                tool_call_id: tool_call_id.into(),
                result,
                is_error,
            })],
        )
    }

    /// Extract the text content, concatenating all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract tool calls from this message.
    pub fn tool_calls(&self) -> Vec<&AgentToolCall> {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::ToolCall(tc) => Some(tc),
                _ => None,
            })
            .collect()
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single part of message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ToolCall(AgentToolCall),
    ToolResult(AgentToolResult),
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// A tool execution result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentToolResult {
    pub tool_call_id: String,
    pub result: serde_json::Value,
    #[serde(default)]
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_tool_calls_skips_empty_text() {
        let call = AgentToolCall {
            id: "call_1".into(),
            name: "get_coin_price".into(),
            arguments: serde_json::json!({"symbol": "BTCUSDT"}),
        };
        let msg = ModelMessage::assistant_tool_calls("", &[call.clone()]);
        assert_eq!(msg.content.len(), 1);
        assert_eq!(msg.tool_calls(), vec![&call]);
        assert!(msg.text().is_empty());
    }
}
