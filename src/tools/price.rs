//! Spot-price lookup tool.
//!
//! Fetches a coin's current price from a public, unauthenticated REST API and
//! renders it as a sentence for the model. Fetch failures are reported as
//! text rather than errors so the model can relay them to the user.

use std::sync::Arc;

use serde::Deserialize;
use strum::{Display, EnumString};
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::symbols::{is_well_formed_symbol, KNOWN_PAIRS};
use super::tool::{AgentTool, Tool};
use super::types::AgentToolParameters;

pub const DEFAULT_BINANCE_BASE_URL: &str = "https://api.binance.com";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

/// Returned whenever the price API answers with a non-200 status, an
/// unexpected body, or the request itself fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch price. Please check the symbol.";

pub const PRICE_TOOL_NAME: &str = "get_coin_price";

/// Base asset symbol to CoinGecko coin id.
const COINGECKO_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("BNB", "binancecoin"),
    ("XRP", "ripple"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("DOT", "polkadot"),
];

/// Which public price API backs the tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PriceSource {
    /// Exchange ticker endpoint; symbols are trading pairs such as `BTCUSDT`.
    #[default]
    Binance,
    /// Coin-price endpoint; symbols map to coin ids through a fixed table.
    #[strum(serialize = "coingecko")]
    CoinGecko,
}

#[derive(Deserialize)]
struct TickerPrice {
    price: String,
}

/// Client for the configured price API.
#[derive(Debug, Clone)]
pub struct PriceClient {
    source: PriceSource,
    binance_base_url: String,
    coingecko_base_url: String,
    http: reqwest::Client,
}

impl PriceClient {
    pub fn new(source: PriceSource, http: reqwest::Client) -> Self {
        Self {
            source,
            binance_base_url: DEFAULT_BINANCE_BASE_URL.to_string(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            http,
        }
    }

    pub fn with_binance_base_url(mut self, url: impl Into<String>) -> Self {
        self.binance_base_url = url.into();
        self
    }

    pub fn with_coingecko_base_url(mut self, url: impl Into<String>) -> Self {
        self.coingecko_base_url = url.into();
        self
    }

    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Look up `symbol` and describe its price in one sentence.
    pub async fn quote(&self, symbol: &str) -> String {
        let symbol = symbol.trim().to_ascii_uppercase();
        if !is_well_formed_symbol(&symbol) {
            return not_supported(self.source, &symbol);
        }

        match self.source {
            PriceSource::Binance => self.quote_binance(&symbol).await,
            PriceSource::CoinGecko => match coingecko_id(&symbol) {
                Some(id) => self.quote_coingecko(&symbol, id).await,
                None => not_supported(self.source, &symbol),
            },
        }
    }

    async fn quote_binance(&self, symbol: &str) -> String {
        let url = format!(
            "{}/api/v3/ticker/price",
            self.binance_base_url.trim_end_matches('/')
        );
        debug!(%symbol, "fetching exchange ticker price");

        let resp = match self.http.get(&url).query(&[("symbol", symbol)]).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%symbol, error = %e, "ticker request failed");
                return FETCH_FAILED_MESSAGE.to_string();
            }
        };

        let status = resp.status().as_u16();
        if status != 200 {
            warn!(%symbol, status, "ticker endpoint returned non-200");
            return FETCH_FAILED_MESSAGE.to_string();
        }

        match resp.json::<TickerPrice>().await {
            Ok(ticker) => format!("The current price of {symbol} is {} USDT", ticker.price),
            Err(e) => {
                warn!(%symbol, error = %e, "ticker body did not parse");
                FETCH_FAILED_MESSAGE.to_string()
            }
        }
    }

    async fn quote_coingecko(&self, symbol: &str, id: &str) -> String {
        let url = format!(
            "{}/api/v3/simple/price",
            self.coingecko_base_url.trim_end_matches('/')
        );
        debug!(%symbol, coin_id = id, "fetching coin price");

        let resp = match self
            .http
            .get(&url)
            .query(&[("ids", id), ("vs_currencies", "usd")])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%symbol, error = %e, "coin price request failed");
                return FETCH_FAILED_MESSAGE.to_string();
            }
        };

        let status = resp.status().as_u16();
        if status != 200 {
            warn!(%symbol, status, "coin price endpoint returned non-200");
            return FETCH_FAILED_MESSAGE.to_string();
        }

        let price = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get(id)?.get("usd")?.as_f64());

        match price {
            Some(price) => format!("The current price of {symbol} ({id}) is {price} USD"),
            None => {
                warn!(%symbol, "coin price body missing usd field");
                FETCH_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// Map an uppercase base asset (`BTC`) or USDT pair (`BTCUSDT`) to a coin id.
pub fn coingecko_id(symbol: &str) -> Option<&'static str> {
    let base = symbol
        .strip_suffix("USDT")
        .filter(|b| !b.is_empty())
        .unwrap_or(symbol);
    COINGECKO_IDS
        .iter()
        .find(|(sym, _)| *sym == base)
        .map(|(_, id)| *id)
}

/// The exchange accepts any listed pair, so only its common pairs are suggested.
fn not_supported(source: PriceSource, symbol: &str) -> String {
    let supported = match source {
        PriceSource::Binance => KNOWN_PAIRS.join(", "),
        PriceSource::CoinGecko => COINGECKO_IDS
            .iter()
            .map(|(sym, _)| *sym)
            .collect::<Vec<_>>()
            .join(", "),
    };
    if symbol.is_empty() {
        format!("Sorry, an empty symbol is not supported. Supported symbols: {supported}")
    } else {
        format!("Sorry, {symbol} is not supported. Supported symbols: {supported}")
    }
}

/// Wrap a [`PriceClient`] as the `get_coin_price` tool.
pub fn price_tool(client: PriceClient) -> Arc<dyn Tool> {
    let description = match client.source() {
        PriceSource::Binance => {
            "Get the current spot price of a crypto trading pair by its exchange symbol, e.g. BTCUSDT or ETHUSDT"
        }
        PriceSource::CoinGecko => {
            "Get the current USD price of a cryptocurrency by its symbol, e.g. BTC, ETH or SOLUSDT"
        }
    };

    Arc::new(AgentTool::new(
        PRICE_TOOL_NAME,
        description,
        AgentToolParameters::object()
            .string("symbol", "Ticker symbol such as BTCUSDT", true)
            .build(),
        move |args: ToolArguments| {
            let client = client.clone();
            async move {
                let symbol = args.get_str("symbol")?;
                Ok(serde_json::Value::String(client.quote(symbol).await))
            }
        },
    ))
}
