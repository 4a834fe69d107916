//! Tool system for function calling.

pub mod arguments;
pub mod price;
pub mod symbols;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use price::{price_tool, PriceClient, PriceSource};
pub use symbols::detect_trading_pair;
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
