//! Trading-pair detection in free-text queries.

/// USDT trading pairs the assistant recognises in user queries.
pub const KNOWN_PAIRS: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT", "DOTUSDT",
];

/// Return the first known trading pair mentioned anywhere in `query`.
///
/// Matching is a plain case-insensitive substring search.
pub fn detect_trading_pair(query: &str) -> Option<&'static str> {
    let upper = query.to_ascii_uppercase();
    KNOWN_PAIRS.iter().copied().find(|pair| upper.contains(pair))
}

/// Whether `symbol` is a non-empty run of ASCII letters and digits.
pub fn is_well_formed_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric())
}
