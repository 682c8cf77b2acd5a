//! Market data access layer
//!
//! `api` talks to the external quote provider, `models` are the cleaned
//! domain shapes, `service` layers the two-tier cache in front of the
//! network.

pub mod api;
pub mod models;
pub mod service;

pub use api::{QuoteApiClient, QuoteFetcher};
pub use models::{ChartPoint, ChartSeries, CompanyOverview, Mover, Quote, TopMovers};
pub use service::MarketDataService;
