//! # kwhtally Core
//!
//! Fetches hourly electricity consumption and production from the Tibber
//! GraphQL API and sums them into peak/off-peak buckets under the Dutch
//! time-of-use schedule.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Tibber adapter with the cursor pagination loop |
//! | [`aggregate`] | Peak/off-peak classification and sums |
//! | [`config`] | Explicit adapter configuration |
//! | [`domain`] | Series, records, intervals and aggregates |
//! | [`error`] | Configuration, transport and protocol errors |
//! | [`holidays`] | Injectable public holiday calendars |
//! | [`http_client`] | HTTP client abstraction |
//! | [`resolver`] | Date range resolution |
//! | [`summary`] | Netting consumption against production |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kwhtally_core::{
//!     PeakOffPeakAggregator, RangeRequest, SeriesKind, TibberAdapter, TibberConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = TibberAdapter::new(TibberConfig::from_env()?);
//!     let (_, records) = adapter
//!         .fetch_range(SeriesKind::Consumption, &RangeRequest::TrailingDays(31))
//!         .await?;
//!
//!     let result = PeakOffPeakAggregator::default().aggregate(&records, SeriesKind::Consumption);
//!     println!("peak: {:.2} kWh, cost: {:.2}", result.peak_total, result.cost_or_profit_total);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │ RangeRequest
//!          ▼
//! ┌─────────────────┐
//! │    Resolver     │──▶ DateInterval
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ TibberAdapter   │────▶│ HTTP Client      │
//! │ (pagination)    │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │ Vec<HourlyRecord>
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Aggregator      │────▶│ HolidayCalendar  │
//! └────────┬────────┘     └──────────────────┘
//!          ▼
//!   AggregateResult ──▶ EnergySummary
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use kwhtally_core::FetchError;
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error {
//!         FetchError::Configuration(_) => "fix the arguments or the token",
//!         FetchError::Transport { .. } => "the API could not be reached",
//!         FetchError::Protocol(_) => "the API answered with something unexpected",
//!     }
//! }
//! ```
//!
//! Nothing is retried internally; wrap calls if retries are needed.

pub mod adapters;
pub mod aggregate;
pub mod config;
pub mod domain;
pub mod error;
pub mod holidays;
pub mod http_client;
pub mod resolver;
pub mod summary;

pub use adapters::TibberAdapter;

pub use aggregate::{PeakOffPeakAggregator, TariffBand};

pub use config::TibberConfig;

pub use domain::{AggregateResult, DateInterval, HourlyRecord, SeriesKind, LOCAL_TZ};

pub use error::{ConfigError, FetchError, ValidationError};

pub use holidays::{DutchHolidays, FixedHolidays, HolidayCalendar, NoHolidays};

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use resolver::{resolve, resolve_at, RangeBound, RangeRequest};

pub use summary::{EnergySummary, NetSummary};
