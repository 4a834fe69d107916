//! Configuration (layered: CLI flags > process env > `.env` file > defaults).

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{AssistantError, Result};
use crate::provider::openai_compatible::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::tools::price::{DEFAULT_BINANCE_BASE_URL, DEFAULT_COINGECKO_BASE_URL};
use crate::tools::PriceSource;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Shown when the model endpoint is needed but no key is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "GEMINI_API_KEY is not set. Please add it to your .env file.";

/// Resolved assistant configuration.
#[derive(Clone, PartialEq)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub price_source: PriceSource,
    pub binance_base_url: String,
    pub coingecko_base_url: String,
    pub bind_addr: String,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("price_source", &self.price_source)
            .field("binance_base_url", &self.binance_base_url)
            .field("coingecko_base_url", &self.coingecko_base_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            price_source: PriceSource::default(),
            binance_base_url: DEFAULT_BINANCE_BASE_URL.to_string(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Load from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // a missing .env is fine
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the process environment, falling back to values in `path`.
    ///
    /// The process environment is not modified.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let file_vars = read_env_file(path)?;
        Self::from_env_and_file(|key| std::env::var(key).ok(), &file_vars)
    }

    /// Resolve `env` first, then `file_vars`.
    pub fn from_env_and_file<F>(env: F, file_vars: &HashMap<String, String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| env(key).or_else(|| file_vars.get(key).cloned()))
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            api_key: get(API_KEY_ENV),
            ..Self::default()
        };

        let overrides: [(&str, &mut String); 5] = [
            ("GEMINI_BASE_URL", &mut config.base_url),
            ("GEMINI_MODEL", &mut config.model),
            ("BINANCE_BASE_URL", &mut config.binance_base_url),
            ("COINGECKO_BASE_URL", &mut config.coingecko_base_url),
            ("ASSISTANT_BIND", &mut config.bind_addr),
        ];
        for (env_var, slot) in overrides {
            if let Some(value) = get(env_var) {
                *slot = value;
            }
        }

        if let Some(source) = get("PRICE_SOURCE") {
            config.price_source = source.trim().parse().map_err(|_| {
                AssistantError::Configuration(format!(
                    "PRICE_SOURCE must be 'binance' or 'coingecko', got '{source}'"
                ))
            })?;
        }

        Ok(config)
    }

    /// The API key, or the startup error shown to the user.
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .ok_or_else(|| AssistantError::Configuration(MISSING_API_KEY_MESSAGE.into()))
    }
}

/// Parse a dotenv-style file without touching the process environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        AssistantError::Configuration(format!("Cannot read {}: {e}", path.display()))
    })?;
    let mut file_vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| {
            AssistantError::Configuration(format!("Invalid line in {}: {e}", path.display()))
        })?;
        file_vars.insert(key, value);
    }
    Ok(file_vars)
}
