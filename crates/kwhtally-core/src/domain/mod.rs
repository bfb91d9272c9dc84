//! # Domain Models
//!
//! Types shared by the resolver, the fetcher and the aggregator.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SeriesKind`] | Consumption or production |
//! | [`HourlyRecord`] | One hour of one series |
//! | [`DateInterval`] | Half-open `[start, end)` range in [`LOCAL_TZ`] |
//! | [`AggregateResult`] | Peak/off-peak totals for one series |

mod interval;
mod models;
mod series;

pub use interval::{DateInterval, LOCAL_TZ};
pub use models::{AggregateResult, HourlyRecord};
pub use series::SeriesKind;
