//! Crypto price assistant.
//!
//! Forwards a user's question to a hosted LLM agent through an OpenAI
//! compatible chat-completions endpoint. The agent can call one tool,
//! `get_coin_price`, which reads a spot price from a public exchange API.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use crypto_assistant::prelude::*;
//!
//! # async fn example() -> crypto_assistant::error::Result<()> {
//! let config = AssistantConfig::from_env()?;
//! let provider: Arc<dyn ModelProvider> = crypto_assistant::provider::create_provider(&config)?.into();
//! let prices = PriceClient::new(config.price_source, reqwest::Client::new());
//! let agent = Agent::crypto_price_agent(provider, vec![price_tool(prices)]);
//! let answer = agent.run("What is the price of BTCUSDT?").await?;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod generation;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cli")]
pub mod cli;
