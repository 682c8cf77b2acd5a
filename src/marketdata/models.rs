//! Domain models for market data
//!
//! These are the cleaned-up shapes the rest of the app works with; the
//! raw provider responses live in `api` and are converted on arrival.
//! Everything here derives both serde directions because the cache
//! round-trips models through JSON.

use serde::{Deserialize, Serialize};

/// Real-time price snapshot for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: Option<f64>,
    pub change_percent: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub previous_close: Option<f64>,
    pub volume: Option<u64>,
    pub latest_trading_day: Option<String>,
}

/// One row of the market movers table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub ticker: String,
    pub price: f64,
    pub change_amount: f64,
    pub change_percentage: String,
    pub volume: Option<u64>,
}

/// Market-wide gainers/losers/most-active snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMovers {
    pub last_updated: Option<String>,
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub most_active: Vec<Mover>,
}

/// Company fundamentals for the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: String,
    pub description: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<u64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
}

/// One OHLCV sample of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

/// Chart series for one symbol and window, oldest point first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub period: String,
    pub points: Vec<ChartPoint>,
}
