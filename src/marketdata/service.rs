//! Cache-aside market data access
//!
//! Every read goes cache first, network second; fresh responses are
//! written back under their canonical key so the next reader (and the
//! next app start, via the durable tier) skips the network entirely.

use super::api::{self, QuoteFetcher};
use super::models::{ChartSeries, CompanyOverview, Quote, TopMovers};
use crate::cache::{keys, CacheManager, ChartPeriod};
use crate::logger::{self, LogTag};
use anyhow::Result;
use std::sync::Arc;

pub struct MarketDataService {
    cache: Arc<CacheManager>,
    fetcher: Arc<dyn QuoteFetcher>,
}

impl MarketDataService {
    pub fn new(cache: Arc<CacheManager>, fetcher: Arc<dyn QuoteFetcher>) -> Self {
        Self { cache, fetcher }
    }

    /// Real-time quote, served from cache within its 2-minute window
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let key = keys::quote(symbol);
        if let Some(quote) = self.cache.get::<Quote>(key.as_str()).await {
            return Ok(quote);
        }

        let symbol = canon(symbol);
        let value = self
            .fetcher
            .fetch_json("GLOBAL_QUOTE", &[("symbol", &symbol)])
            .await?;
        let quote = api::parse_global_quote(&value)?;
        self.cache.set(&key, &quote, None).await;
        logger::info(LogTag::Market, &format!("fetched quote for {}", symbol));
        Ok(quote)
    }

    /// Company fundamentals
    pub async fn overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let key = keys::overview(symbol);
        if let Some(overview) = self.cache.get::<CompanyOverview>(key.as_str()).await {
            return Ok(overview);
        }

        let symbol = canon(symbol);
        let value = self
            .fetcher
            .fetch_json("OVERVIEW", &[("symbol", &symbol)])
            .await?;
        let overview = api::parse_overview(&value)?;
        self.cache.set(&key, &overview, None).await;
        logger::info(LogTag::Market, &format!("fetched overview for {}", symbol));
        Ok(overview)
    }

    /// Chart series for one window; TTL follows the window's granularity
    pub async fn chart(&self, symbol: &str, period: ChartPeriod) -> Result<ChartSeries> {
        let key = keys::chart(symbol, period);
        if let Some(series) = self.cache.get::<ChartSeries>(key.as_str()).await {
            return Ok(series);
        }

        let symbol = canon(symbol);
        let (function, extra) = chart_request(period);
        let mut params: Vec<(&str, &str)> = vec![("symbol", &symbol)];
        params.extend_from_slice(extra);

        let value = self.fetcher.fetch_json(function, &params).await?;
        let series = api::parse_chart(&symbol, period.as_str(), &value)?;
        self.cache.set(&key, &series, None).await;
        logger::info(
            LogTag::Market,
            &format!("fetched {} chart for {} ({} points)", period, symbol, series.points.len()),
        );
        Ok(series)
    }

    /// Market-wide movers snapshot
    pub async fn top_movers(&self) -> Result<TopMovers> {
        let key = keys::top_movers();
        if let Some(movers) = self.cache.get::<TopMovers>(key.as_str()).await {
            return Ok(movers);
        }

        let value = self.fetcher.fetch_json("TOP_GAINERS_LOSERS", &[]).await?;
        let movers = api::parse_top_movers(&value)?;
        self.cache.set(&key, &movers, None).await;
        logger::info(LogTag::Market, "fetched market movers");
        Ok(movers)
    }

    /// Force-refetch a quote, dropping the cached one first
    pub async fn refresh_quote(&self, symbol: &str) -> Result<Quote> {
        self.cache.remove(keys::quote(symbol).as_str()).await;
        self.quote(symbol).await
    }

    /// Drop every cached resource belonging to one symbol
    pub async fn invalidate_symbol(&self, symbol: &str) {
        self.cache
            .invalidate_pattern(&keys::symbol_pattern(symbol))
            .await;
    }
}

/// Provider function and fixed parameters per chart window
fn chart_request(period: ChartPeriod) -> (&'static str, &'static [(&'static str, &'static str)]) {
    match period {
        ChartPeriod::OneDay => (
            "TIME_SERIES_INTRADAY",
            &[("interval", "5min"), ("outputsize", "compact")],
        ),
        ChartPeriod::OneWeek | ChartPeriod::OneMonth | ChartPeriod::ThreeMonths => {
            ("TIME_SERIES_DAILY", &[("outputsize", "compact")])
        }
        ChartPeriod::OneYear | ChartPeriod::FiveYears => ("TIME_SERIES_WEEKLY", &[]),
    }
}

fn canon(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
