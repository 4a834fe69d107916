//! Model provider trait and the chat-completions implementation.

pub mod format;
pub mod http;
pub mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleProvider;

use async_trait::async_trait;

use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate text (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, AssistantError>;
}

/// Create the provider described by `config`.
///
/// Fails with the startup message when no API key is configured.
pub fn create_provider(config: &AssistantConfig) -> Result<Box<dyn ModelProvider>, AssistantError> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(OpenAiCompatibleProvider::new(
        config.model.clone(),
        api_key,
        config.base_url.clone(),
    )))
}
