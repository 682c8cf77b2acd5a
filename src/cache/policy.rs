//! Cache TTL policy per resource kind
//!
//! TTLs tuned for how fast each resource actually changes upstream:
//! - Quotes: near-real-time, must stay fresh
//! - Market movers / intraday charts: recomputed server-side every few minutes
//! - Fundamentals and profiles: change on the order of hours to days
//!
//! The kind travels with the key (see [`CacheKey`]) instead of being
//! inferred from the key string, so a key can never fall under two
//! policies at once.

use crate::constants::DEFAULT_TTL_MINUTES;
use std::time::Duration;

/// Logical resource families served by the quote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Real-time price snapshot
    Quote,
    /// Market-wide gainers/losers/most-active snapshot
    TopMovers,
    /// Short-interval chart series
    IntradayChart,
    /// Daily-granularity chart series
    DailyChart,
    /// Long-range historical series
    HistoricalChart,
    /// Company fundamentals
    Overview,
    /// Static company profile
    Profile,
    /// Anything without a dedicated policy
    Other,
}

impl ResourceKind {
    /// Tabled TTL in minutes
    pub fn ttl_minutes(&self) -> u64 {
        match self {
            ResourceKind::Quote => 2,
            ResourceKind::TopMovers => 5,
            ResourceKind::IntradayChart => 5,
            ResourceKind::DailyChart => 30,
            ResourceKind::HistoricalChart => 720,
            ResourceKind::Overview => 60,
            ResourceKind::Profile => 1440,
            ResourceKind::Other => DEFAULT_TTL_MINUTES,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes() * 60)
    }
}

/// Chart window selectable on a detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPeriod {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "1D",
            ChartPeriod::OneWeek => "1W",
            ChartPeriod::OneMonth => "1M",
            ChartPeriod::ThreeMonths => "3M",
            ChartPeriod::OneYear => "1Y",
            ChartPeriod::FiveYears => "5Y",
        }
    }

    /// Resource kind (and therefore TTL) the window maps to
    pub fn kind(&self) -> ResourceKind {
        match self {
            ChartPeriod::OneDay => ResourceKind::IntradayChart,
            ChartPeriod::OneWeek | ChartPeriod::OneMonth | ChartPeriod::ThreeMonths => {
                ResourceKind::DailyChart
            }
            ChartPeriod::OneYear | ChartPeriod::FiveYears => ResourceKind::HistoricalChart,
        }
    }
}

impl std::str::FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1D" => Ok(ChartPeriod::OneDay),
            "1W" => Ok(ChartPeriod::OneWeek),
            "1M" => Ok(ChartPeriod::OneMonth),
            "3M" => Ok(ChartPeriod::ThreeMonths),
            "1Y" => Ok(ChartPeriod::OneYear),
            "5Y" => Ok(ChartPeriod::FiveYears),
            other => Err(format!(
                "unknown chart period '{}' (expected 1D, 1W, 1M, 3M, 1Y or 5Y)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A canonical cache key: the string callers address entries by, plus the
/// resource kind that decides its TTL at `set` time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ResourceKind,
    value: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
