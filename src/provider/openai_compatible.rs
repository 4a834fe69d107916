//! Provider for any OpenAI Chat Completions compatible endpoint.
//!
//! The hosted Gemini model is reached through its OpenAI-compatible surface,
//! so this is the only provider the assistant needs.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::AssistantError;
use crate::types::*;

use super::format::tool_result_to_string;
use super::http::{bearer_headers, retry_after_header, shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct OpenAiCompatibleProvider {
    model_id: String,
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(model_id: impl Into<String>, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: shared_client().clone(),
        }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model_id.clone().into());
        body.insert("messages".into(), messages.into());

        let settings = &request.settings;
        if let Some(max) = settings.max_tokens {
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            body.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = settings.top_p {
            body.insert("top_p".into(), top_p.into());
        }
        if let Some(ref stops) = settings.stop_sequences {
            body.insert("stop".into(), serde_json::json!(stops));
        }
        if let Some(seed) = settings.seed {
            body.insert("seed".into(), seed.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters,
                            }
                        })
                    })
                    .collect();
                body.insert("tools".into(), tool_defs.into());
            }
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AssistantError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model_id, messages = request.messages.len(), "chat completion request");

        let resp = self
            .http
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let retry_after = retry_after_header(resp.headers());
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text, retry_after));
        }

        let data: ChatResponse = serde_json::from_str(&resp.text().await?)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::api(200, "No choices in chat completion response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| AgentToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        let finish_reason = choice.finish_reason.as_deref().and_then(parse_finish_reason);

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            tool_calls,
            finish_reason,
        })
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_openai(msg: &ModelMessage) -> serde_json::Value {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    if let Some(ContentPart::ToolResult(tr)) = msg.content.first() {
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": tool_result_to_string(&tr.result),
        });
    }

    let tool_calls = msg.tool_calls();
    if !tool_calls.is_empty() {
        let tc_json: Vec<serde_json::Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": match &tc.arguments {
                            serde_json::Value::String(raw) => raw.clone(),
                            other => other.to_string(),
                        },
                    }
                })
            })
            .collect();
        let text = msg.text();
        return serde_json::json!({
            "role": role,
            "content": if text.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(text) },
            "tool_calls": tc_json,
        });
    }

    serde_json::json!({ "role": role, "content": msg.text() })
}

// Chat Completions response types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
