//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentAnswer};
pub use crate::config::AssistantConfig;
pub use crate::error::{AssistantError, Result};
pub use crate::provider::ModelProvider;
pub use crate::tools::{price_tool, PriceClient, PriceSource, Tool};
pub use crate::types::{GenerationSettings, ModelMessage, Role, Usage};
