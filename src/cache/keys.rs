//! Canonical cache key construction
//!
//! Callers go through these helpers instead of hand-building key strings,
//! so every entry lands under the right TTL policy and pattern
//! invalidation (`_<SYMBOL>`) reliably catches a symbol's whole family.

use super::policy::{CacheKey, ChartPeriod, ResourceKind};

/// Real-time quote for one symbol: `quote_AAPL`
pub fn quote(symbol: &str) -> CacheKey {
    CacheKey::new(ResourceKind::Quote, format!("quote_{}", canon(symbol)))
}

/// Company fundamentals for one symbol: `overview_AAPL`
pub fn overview(symbol: &str) -> CacheKey {
    CacheKey::new(ResourceKind::Overview, format!("overview_{}", canon(symbol)))
}

/// Static company profile for one symbol: `profile_AAPL`
pub fn profile(symbol: &str) -> CacheKey {
    CacheKey::new(ResourceKind::Profile, format!("profile_{}", canon(symbol)))
}

/// Chart series for a symbol and window: `chart_AAPL_1D`
///
/// The TTL follows the window's granularity (intraday/daily/historical).
pub fn chart(symbol: &str, period: ChartPeriod) -> CacheKey {
    CacheKey::new(
        period.kind(),
        format!("chart_{}_{}", canon(symbol), period.as_str()),
    )
}

/// Market-wide movers snapshot: `top_gainers_losers`
pub fn top_movers() -> CacheKey {
    CacheKey::new(ResourceKind::TopMovers, "top_gainers_losers")
}

/// Substring matching every key belonging to one symbol, for bulk
/// invalidation via `CacheManager::invalidate_pattern`
pub fn symbol_pattern(symbol: &str) -> String {
    format!("_{}", canon(symbol))
}

fn canon(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
