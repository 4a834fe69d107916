//! Crypto assistant binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crypto_assistant::agent::Agent;
use crypto_assistant::cli::{AskArgs, Cli, Commands, GlobalArgs, PriceArgs, ServeArgs};
use crypto_assistant::config::AssistantConfig;
use crypto_assistant::error::Result;
use crypto_assistant::provider::{self, http::shared_client};
use crypto_assistant::tools::{price_tool, PriceClient};
use crypto_assistant::web::{self, WebState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_config(&cli.global) {
        Ok(config) => match cli.command {
            Commands::Serve(args) => handle_serve(&cli.global, config, args).await,
            Commands::Ask(args) => handle_ask(&cli.global, config, args).await,
            Commands::Price(args) => handle_price(config, args).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if e.is_auth() {
            eprintln!("The model endpoint rejected the credentials; check GEMINI_API_KEY.");
        }
        std::process::exit(1);
    }
}

fn load_config(global: &GlobalArgs) -> Result<AssistantConfig> {
    let mut config = match global.env_file {
        Some(ref path) => AssistantConfig::from_env_file(path)?,
        None => AssistantConfig::from_env()?,
    };
    global.apply(&mut config);
    Ok(config)
}

fn price_client(config: &AssistantConfig) -> PriceClient {
    PriceClient::new(config.price_source, shared_client().clone())
        .with_binance_base_url(config.binance_base_url.clone())
        .with_coingecko_base_url(config.coingecko_base_url.clone())
}

fn build_agent(global: &GlobalArgs, config: &AssistantConfig) -> Result<Agent> {
    let provider: Arc<dyn provider::ModelProvider> = provider::create_provider(config)?.into();
    let tools = if global.no_tools {
        Vec::new()
    } else {
        vec![price_tool(price_client(config))]
    };
    Ok(Agent::crypto_price_agent(provider, tools))
}

async fn handle_serve(global: &GlobalArgs, mut config: AssistantConfig, args: ServeArgs) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let agent = build_agent(global, &config)?;
    web::serve(WebState::new(agent), &config.bind_addr, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn handle_ask(global: &GlobalArgs, config: AssistantConfig, args: AskArgs) -> Result<()> {
    let agent = build_agent(global, &config)?;
    let answer = agent.run(&args.query()).await?;
    println!("{}", answer.text);
    Ok(())
}

async fn handle_price(config: AssistantConfig, args: PriceArgs) -> Result<()> {
    let text = price_client(&config).quote(&args.symbol).await;
    println!("{text}");
    Ok(())
}
