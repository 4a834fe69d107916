//! The assistant agent.

pub mod agent;

pub use agent::{Agent, AgentAnswer, CRYPTO_AGENT_INSTRUCTIONS, CRYPTO_AGENT_NAME};
