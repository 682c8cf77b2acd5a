//! Quote API client and response parsing
//!
//! The provider is treated as an opaque, sometimes-unreliable JSON
//! source: `QuoteFetcher` is the seam the service layer consumes, and
//! the Alpha-Vantage-style HTTP client is one implementation of it.
//! Responses carry numbers as strings and report errors inside 200-OK
//! bodies under well-known keys.

use super::models::{ChartPoint, ChartSeries, CompanyOverview, Mover, Quote, TopMovers};
use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Opaque JSON source for market data
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetch one API function with its query parameters
    async fn fetch_json(&self, function: &str, params: &[(&str, &str)]) -> Result<Value>;
}

/// HTTP client for the quote API
pub struct QuoteApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl QuoteApiClient {
    pub fn new(config: &ApiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl QuoteFetcher for QuoteApiClient {
    async fn fetch_json(&self, function: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = vec![("function", function), ("apikey", &self.api_key)];
        query.extend_from_slice(params);

        logger::debug(LogTag::Api, &format!("GET {} function={}", self.base_url, function));

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Request {
                endpoint: function.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                endpoint: function.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let value: Value = response.json().await.map_err(|e| ApiError::Request {
            endpoint: function.to_string(),
            source: e,
        })?;

        check_api_rejection(&value)?;
        Ok(value)
    }
}

/// The provider reports problems inside 200-OK bodies; surface them as
/// real errors before any parsing is attempted.
fn check_api_rejection(value: &Value) -> Result<(), ApiError> {
    if let Some(message) = value.get("Error Message").and_then(Value::as_str) {
        return Err(ApiError::Rejected {
            message: message.to_string(),
        });
    }
    for key in ["Note", "Information"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            return Err(ApiError::RateLimited {
                message: message.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------
// Raw response shapes and conversion to domain models
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GlobalQuoteEnvelope {
    #[serde(rename = "Global Quote")]
    quote: RawGlobalQuote,
}

#[derive(Debug, Deserialize)]
struct RawGlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

pub fn parse_global_quote(value: &Value) -> Result<Quote> {
    let envelope: GlobalQuoteEnvelope =
        serde_json::from_value(value.clone()).map_err(|e| ApiError::MalformedResponse {
            data_type: "quote".to_string(),
            reason: e.to_string(),
        })?;
    let raw = envelope.quote;

    Ok(Quote {
        price: raw.price.parse().map_err(|_| ApiError::MalformedResponse {
            data_type: "quote".to_string(),
            reason: format!("unparsable price '{}'", raw.price),
        })?,
        symbol: raw.symbol,
        change: parse_opt_f64(raw.change),
        change_percent: raw.change_percent,
        open: parse_opt_f64(raw.open),
        high: parse_opt_f64(raw.high),
        low: parse_opt_f64(raw.low),
        previous_close: parse_opt_f64(raw.previous_close),
        volume: parse_opt_u64(raw.volume),
        latest_trading_day: raw.latest_trading_day,
    })
}

#[derive(Debug, Deserialize)]
struct TopMoversEnvelope {
    last_updated: Option<String>,
    #[serde(default)]
    top_gainers: Vec<RawMover>,
    #[serde(default)]
    top_losers: Vec<RawMover>,
    #[serde(default)]
    most_actively_traded: Vec<RawMover>,
}

#[derive(Debug, Deserialize)]
struct RawMover {
    ticker: String,
    price: String,
    change_amount: String,
    change_percentage: String,
    volume: Option<String>,
}

pub fn parse_top_movers(value: &Value) -> Result<TopMovers> {
    let envelope: TopMoversEnvelope =
        serde_json::from_value(value.clone()).map_err(|e| ApiError::MalformedResponse {
            data_type: "top movers".to_string(),
            reason: e.to_string(),
        })?;

    let convert = |raw: Vec<RawMover>| -> Vec<Mover> {
        raw.into_iter()
            .filter_map(|m| {
                Some(Mover {
                    price: m.price.parse().ok()?,
                    change_amount: m.change_amount.parse().ok()?,
                    ticker: m.ticker,
                    change_percentage: m.change_percentage,
                    volume: parse_opt_u64(m.volume),
                })
            })
            .collect()
    };

    Ok(TopMovers {
        last_updated: envelope.last_updated,
        gainers: convert(envelope.top_gainers),
        losers: convert(envelope.top_losers),
        most_active: convert(envelope.most_actively_traded),
    })
}

pub fn parse_overview(value: &Value) -> Result<CompanyOverview> {
    let symbol = str_field(value, "Symbol");
    let name = str_field(value, "Name");
    let (Some(symbol), Some(name)) = (symbol, name) else {
        return Err(ApiError::MalformedResponse {
            data_type: "overview".to_string(),
            reason: "missing Symbol/Name".to_string(),
        }
        .into());
    };

    Ok(CompanyOverview {
        symbol,
        name,
        description: str_field(value, "Description"),
        exchange: str_field(value, "Exchange"),
        sector: str_field(value, "Sector"),
        industry: str_field(value, "Industry"),
        market_cap: num_field(value, "MarketCapitalization").map(|v| v as u64),
        pe_ratio: num_field(value, "PERatio"),
        dividend_yield: num_field(value, "DividendYield"),
        week52_high: num_field(value, "52WeekHigh"),
        week52_low: num_field(value, "52WeekLow"),
    })
}

/// Parse any of the provider's time-series payloads into a chart series
///
/// The series object sits under a payload-dependent key ("Time Series
/// (5min)", "Time Series (Daily)", "Weekly Time Series", ...) mapping
/// timestamps to OHLCV records with numbered field names.
pub fn parse_chart(symbol: &str, period: &str, value: &Value) -> Result<ChartSeries> {
    let series = value
        .as_object()
        .and_then(|map| {
            map.iter()
                .find(|(k, _)| k.contains("Time Series"))
                .map(|(_, v)| v)
        })
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::MalformedResponse {
            data_type: "chart".to_string(),
            reason: "no time series object in response".to_string(),
        })?;

    // BTreeMap sorts ISO timestamps lexicographically = chronologically
    let ordered: BTreeMap<&String, &Value> = series.iter().collect();
    let points: Vec<ChartPoint> = ordered
        .into_iter()
        .filter_map(|(timestamp, sample)| {
            Some(ChartPoint {
                timestamp: timestamp.clone(),
                open: num_field(sample, "1. open")?,
                high: num_field(sample, "2. high")?,
                low: num_field(sample, "3. low")?,
                close: num_field(sample, "4. close")?,
                volume: num_field(sample, "5. volume").map(|v| v as u64),
            })
        })
        .collect();

    if points.is_empty() {
        return Err(ApiError::MalformedResponse {
            data_type: "chart".to_string(),
            reason: "time series contained no parsable points".to_string(),
        }
        .into());
    }

    Ok(ChartSeries {
        symbol: symbol.to_string(),
        period: period.to_string(),
        points,
    })
}

fn parse_opt_f64(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim_end_matches('%').parse().ok())
}

fn parse_opt_u64(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.parse().ok())
}

/// String field, with the provider's "None"/"-" placeholders mapped away
fn str_field(value: &Value, name: &str) -> Option<String> {
    value
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty() && *s != "None" && *s != "-")
        .map(str::to_string)
}

fn num_field(value: &Value, name: &str) -> Option<f64> {
    value
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_global_quote_payload() {
        let payload = json!({
            "Global Quote": {
                "01. symbol": "AAPL",
                "02. open": "184.2000",
                "03. high": "186.1000",
                "04. low": "183.5000",
                "05. price": "185.3000",
                "06. volume": "51234321",
                "07. latest trading day": "2024-03-01",
                "08. previous close": "184.0000",
                "09. change": "1.3000",
                "10. change percent": "0.7065%"
            }
        });

        let quote = parse_global_quote(&payload).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 185.3);
        assert_eq!(quote.change, Some(1.3));
        assert_eq!(quote.volume, Some(51_234_321));
    }

    #[test]
    fn unparsable_price_is_a_malformed_response() {
        let payload = json!({"Global Quote": {"01. symbol": "AAPL", "05. price": "n/a"}});
        assert!(parse_global_quote(&payload).is_err());
    }

    #[test]
    fn parses_top_movers_and_skips_broken_rows() {
        let payload = json!({
            "last_updated": "2024-03-01 16:15:59 US/Eastern",
            "top_gainers": [
                {"ticker": "UP", "price": "4.31", "change_amount": "1.92", "change_percentage": "80.33%", "volume": "32441"},
                {"ticker": "BAD", "price": "??", "change_amount": "1.0", "change_percentage": "1%", "volume": "1"}
            ],
            "top_losers": [],
            "most_actively_traded": []
        });

        let movers = parse_top_movers(&payload).unwrap();
        assert_eq!(movers.gainers.len(), 1);
        assert_eq!(movers.gainers[0].ticker, "UP");
        assert!(movers.losers.is_empty());
    }

    #[test]
    fn parses_overview_with_placeholder_fields() {
        let payload = json!({
            "Symbol": "AAPL",
            "Name": "Apple Inc",
            "Description": "Designs smartphones.",
            "Exchange": "NASDAQ",
            "Sector": "TECHNOLOGY",
            "Industry": "None",
            "MarketCapitalization": "2800000000000",
            "PERatio": "28.5",
            "DividendYield": "0.0055",
            "52WeekHigh": "199.62",
            "52WeekLow": "124.17"
        });

        let overview = parse_overview(&payload).unwrap();
        assert_eq!(overview.name, "Apple Inc");
        assert_eq!(overview.industry, None);
        assert_eq!(overview.market_cap, Some(2_800_000_000_000));
        assert_eq!(overview.week52_high, Some(199.62));
    }

    #[test]
    fn parses_daily_chart_in_chronological_order() {
        let payload = json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2024-03-01": {"1. open": "184.0", "2. high": "186.0", "3. low": "183.0", "4. close": "185.3", "5. volume": "100"},
                "2024-02-29": {"1. open": "182.0", "2. high": "184.5", "3. low": "181.0", "4. close": "184.0", "5. volume": "90"}
            }
        });

        let series = parse_chart("AAPL", "1M", &payload).unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].timestamp, "2024-02-29");
        assert_eq!(series.points[1].close, 185.3);
    }

    #[test]
    fn rate_limit_note_is_an_error() {
        let payload = json!({"Note": "Thank you for using our API! Please slow down."});
        assert!(check_api_rejection(&payload).is_err());
    }
}
