//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::AssistantError;

/// Core tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description sent to the model.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool with parsed arguments.
    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, AssistantError>;
}

type ToolHandler = dyn Fn(ToolArguments) -> BoxFuture<'static, Result<serde_json::Value, AssistantError>>
    + Send
    + Sync;

/// Closure-based tool.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: Arc<ToolHandler>,
}

impl AgentTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, AssistantError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(
                move |args| -> BoxFuture<'static, Result<serde_json::Value, AssistantError>> {
                    Box::pin(handler(args))
                },
            ),
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, AssistantError> {
        (self.handler)(args.clone()).await.map_err(|e| match e {
            e @ AssistantError::ToolExecution { .. } => e,
            other => AssistantError::ToolExecution {
                tool_name: self.name.clone(),
                message: other.to_string(),
            },
        })
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
