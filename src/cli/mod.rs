//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AssistantConfig;
use crate::tools::PriceSource;

/// Crypto price assistant.
#[derive(Parser, Debug)]
#[command(name = "crypto-assistant", version, about = "Ask an LLM agent about crypto prices")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Model served by the chat-completions endpoint (overrides GEMINI_MODEL)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Price API backing the tool: binance or coingecko (overrides PRICE_SOURCE)
    #[arg(long, global = true)]
    pub source: Option<PriceSource>,

    /// Run the agent without the price tool
    #[arg(long, global = true)]
    pub no_tools: bool,

    /// Read settings from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web widget
    Serve(ServeArgs),
    /// Ask a single question and print the answer
    Ask(AskArgs),
    /// Look up a price directly, without the model
    Price(PriceArgs),
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides ASSISTANT_BIND)
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for `ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `price`.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Ticker symbol, e.g. BTCUSDT
    pub symbol: String,
}

impl GlobalArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AssistantConfig) {
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(source) = self.source {
            config.price_source = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_serve_with_defaults() {
        let cli = Cli::try_parse_from(["crypto-assistant", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert!(args.bind.is_none()),
            other => panic!("expected Serve, got {other:?}"),
        }
        assert!(cli.global.model.is_none());
        assert!(!cli.global.no_tools);
    }

    #[test]
    fn parse_ask_joins_words() {
        let cli = Cli::try_parse_from(["crypto-assistant", "ask", "price", "of", "BTCUSDT?"]).unwrap();
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.query(), "price of BTCUSDT?"),
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "crypto-assistant",
            "price",
            "ethusdt",
            "--source",
            "coingecko",
            "-m",
            "gemini-1.5-flash",
            "--no-tools",
        ])
        .unwrap();
        assert_eq!(cli.global.source, Some(PriceSource::CoinGecko));
        assert!(cli.global.no_tools);
        match cli.command {
            Commands::Price(args) => assert_eq!(args.symbol, "ethusdt"),
            other => panic!("expected Price, got {other:?}"),
        }

        let mut config = AssistantConfig::default();
        cli.global.apply(&mut config);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.price_source, PriceSource::CoinGecko);
    }

    #[test]
    fn unknown_source_is_error() {
        assert!(Cli::try_parse_from(["crypto-assistant", "--source", "kraken", "serve"]).is_err());
    }

    #[test]
    fn ask_without_query_is_error() {
        assert!(Cli::try_parse_from(["crypto-assistant", "ask"]).is_err());
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["crypto-assistant"]).is_err());
    }
}
