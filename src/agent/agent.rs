//! Agent: instructions, a model provider and optional tools.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::error::AssistantError;
use crate::generation::generate_text;
use crate::provider::ModelProvider;
use crate::tools::symbols::detect_trading_pair;
use crate::tools::tool::Tool;
use crate::types::*;

pub const CRYPTO_AGENT_NAME: &str = "Crypto Price Agent";

pub const CRYPTO_AGENT_INSTRUCTIONS: &str = "\
You are a helpful AI assistant with expertise in cryptocurrency. You can answer general questions, \
but you are especially good at questions related to crypto prices, market trends, and coin information.

Use the `get_coin_price` tool when the user asks for a specific coin price using its symbol \
(like BTCUSDT or ETHUSDT).

If a question is not about crypto, feel free to still give a helpful answer.";

/// Outcome of one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentAnswer {
    pub text: String,
    /// Known trading pair mentioned in the query, if any.
    pub detected_symbol: Option<&'static str>,
    pub tool_calls: usize,
    pub usage: Usage,
}

/// A stateless agent: every [`Agent::run`] is an independent interaction.
pub struct Agent {
    name: String,
    instructions: String,
    provider: Arc<dyn ModelProvider>,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
}

impl Agent {
    /// Create a new agent with no instructions or tools.
    pub fn new(name: impl Into<String>, provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            provider,
            tools: Vec::new(),
            settings: GenerationSettings::default(),
        }
    }

    /// The crypto assistant with its standard instructions.
    pub fn crypto_price_agent(provider: Arc<dyn ModelProvider>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self::new(CRYPTO_AGENT_NAME, provider)
            .with_instructions(CRYPTO_AGENT_INSTRUCTIONS)
            .with_tools(tools)
    }

    /// Set the system prompt.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Add several tools.
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Answer one user query, running any tool calls the model requests.
    pub async fn run(&self, query: &str) -> Result<AgentAnswer, AssistantError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AssistantError::InvalidArgument("query is empty".into()));
        }

        let detected_symbol = detect_trading_pair(query);
        info!(agent = %self.name, symbol = ?detected_symbol, "running agent");

        let mut messages = Vec::with_capacity(2);
        if !self.instructions.is_empty() {
            messages.push(ModelMessage::system(self.instructions.clone()));
        }
        messages.push(ModelMessage::user(query));

        let result =
            generate_text(self.provider.as_ref(), messages, self.settings.clone(), &self.tools)
                .await?;

        Ok(AgentAnswer {
            tool_calls: result.tool_call_count(),
            text: result.text,
            detected_symbol,
            usage: result.usage,
        })
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.provider.model_id())
            .field("tools", &self.tool_names())
            .finish()
    }
}
