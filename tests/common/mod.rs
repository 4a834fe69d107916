//! Shared test helpers and mock provider.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use crypto_assistant::error::AssistantError;
use crypto_assistant::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use crypto_assistant::types::*;

/// A mock provider that returns canned responses in order and records requests.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<Vec<Result<ProviderResponse, AssistantError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push(Ok(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        }));
    }

    /// Queue a provider failure.
    pub fn queue_error(&self, err: AssistantError) {
        self.responses.lock().unwrap().push(Err(err));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AssistantError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderResponse {
                text: "Mock response".to_string(),
                usage: Usage::default(),
                tool_calls: vec![],
                finish_reason: Some(FinishReason::Stop),
            });
        }
        responses.remove(0)
    }
}
