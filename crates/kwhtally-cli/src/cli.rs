//! CLI argument definitions for kwhtally.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hourly` | Fetch the hourly records of one series |
//! | `summary` | Fetch both series and print peak/off-peak totals |
//!
//! # Examples
//!
//! ```bash
//! # Last 31 full days, both series
//! kwhtally summary --pretty
//!
//! # Hourly production for January
//! kwhtally hourly --series production --start 2024-01-01 --end 2024-02-01
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use kwhtally_core::{RangeBound, RangeRequest, SeriesKind};

use crate::error::CliError;

/// Hourly Tibber consumption and production, split into Dutch peak and off-peak hours.
///
/// The API token is read from TIBBER_API_TOKEN (a `.env` file is honored).
#[derive(Debug, Parser)]
#[command(name = "kwhtally", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout per page in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the hourly records of one series.
    Hourly(HourlyArgs),

    /// Fetch both series and print peak/off-peak totals and the net result.
    Summary(RangeArgs),
}

#[derive(Debug, Args)]
pub struct HourlyArgs {
    /// Series to fetch.
    #[arg(long, value_enum)]
    pub series: SeriesArg,

    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesArg {
    Consumption,
    Production,
}

impl From<SeriesArg> for SeriesKind {
    fn from(value: SeriesArg) -> Self {
        match value {
            SeriesArg::Consumption => Self::Consumption,
            SeriesArg::Production => Self::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD) or timestamp, inclusive.
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD) or timestamp, exclusive.
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Number of full days up to and including yesterday [default: 31].
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,
}

const DEFAULT_DAYS: u32 = 31;

impl RangeArgs {
    pub fn to_request(&self) -> Result<RangeRequest, CliError> {
        let start = self
            .start
            .as_deref()
            .map(str::parse::<RangeBound>)
            .transpose()?;
        let end = self
            .end
            .as_deref()
            .map(str::parse::<RangeBound>)
            .transpose()?;
        let days = match (&start, &end, self.days) {
            (None, None, None) => Some(DEFAULT_DAYS),
            _ => self.days,
        };
        Ok(RangeRequest::from_parts(start, end, days)?)
    }
}
