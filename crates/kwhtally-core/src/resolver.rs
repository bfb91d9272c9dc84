//! Date range resolution.
//!
//! Turns either an explicit `(start, end)` pair or a trailing day count into a
//! [`DateInterval`] in [`LOCAL_TZ`]. All validation happens here, before any
//! request is built.
//!
//! | Input | Meaning |
//! |-------|---------|
//! | [`RangeBound::Date`] | Local midnight of that date |
//! | [`RangeBound::Naive`] | Wall-clock time, already in [`LOCAL_TZ`] |
//! | [`RangeBound::Zoned`] | Absolute instant, converted to [`LOCAL_TZ`] |
//!
//! Trailing windows end at today's local midnight (exclusive), so only fully
//! elapsed days are covered: the provider does not finalize the current day.

use std::str::FromStr;

use chrono::{
    DateTime, Days, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::{ConfigError, DateInterval, LOCAL_TZ};

/// One end of a user supplied range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Date(NaiveDate),
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl RangeBound {
    pub fn to_local(self) -> DateTime<Tz> {
        match self {
            Self::Date(date) => localize(date.and_time(NaiveTime::MIN)),
            Self::Naive(naive) => localize(naive),
            Self::Zoned(instant) => instant.with_timezone(&LOCAL_TZ),
        }
    }
}

impl From<NaiveDate> for RangeBound {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for RangeBound {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for RangeBound {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl FromStr for RangeBound {
    type Err = ConfigError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339 with an offset.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::Zoned(instant));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self::Naive(naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::Date(date));
        }
        Err(ConfigError::invalid_argument(format!(
            "'{trimmed}' is not a date (YYYY-MM-DD) or timestamp"
        )))
    }
}

/// Either an explicit range or a trailing number of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    Explicit { start: RangeBound, end: RangeBound },
    TrailingDays(u32),
}

impl RangeRequest {
    /// Builds a request from optional CLI style arguments.
    ///
    /// Exactly one mode must be given: a complete `start`/`end` pair or a
    /// day count. Mixing them, or a lone `start` or `end`, is rejected.
    pub fn from_parts(
        start: Option<RangeBound>,
        end: Option<RangeBound>,
        days: Option<u32>,
    ) -> Result<Self, ConfigError> {
        match (start, end, days) {
            (Some(start), Some(end), None) => Ok(Self::Explicit { start, end }),
            (None, None, Some(days)) => Ok(Self::TrailingDays(days)),
            (Some(_), Some(_), Some(_)) => Err(ConfigError::invalid_argument(
                "use either start and end, or days, not both",
            )),
            (Some(_), None, _) | (None, Some(_), _) => Err(ConfigError::invalid_argument(
                "start and end must be provided together",
            )),
            (None, None, None) => Err(ConfigError::invalid_argument(
                "provide either start and end, or a number of days",
            )),
        }
    }
}

/// Resolves against the system clock.
pub fn resolve(request: &RangeRequest) -> Result<DateInterval, ConfigError> {
    resolve_at(request, Utc::now())
}

pub fn resolve_at<T: TimeZone>(
    request: &RangeRequest,
    now: DateTime<T>,
) -> Result<DateInterval, ConfigError> {
    let interval = match *request {
        RangeRequest::Explicit { start, end } => {
            DateInterval::new(start.to_local(), end.to_local())?
        }
        RangeRequest::TrailingDays(days) => {
            if days == 0 {
                return Err(ConfigError::invalid_argument(
                    "days must be greater than zero",
                ));
            }
            let today = now.with_timezone(&LOCAL_TZ).date_naive();
            let first_day = today
                .checked_sub_days(Days::new(u64::from(days)))
                .ok_or_else(|| {
                    ConfigError::invalid_argument(format!("days {days} is out of range"))
                })?;
            DateInterval::new(
                RangeBound::Date(first_day).to_local(),
                RangeBound::Date(today).to_local(),
            )?
        }
    };

    tracing::debug!(%interval, "resolved date range");
    Ok(interval)
}

// Ambiguous wall-clock times (autumn fold) take the earlier instant. Times in
// the spring gap are read with the pre-transition offset, which lands one hour
// later on the clock.
fn localize(naive: NaiveDateTime) -> DateTime<Tz> {
    match LOCAL_TZ.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            LOCAL_TZ
                .from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(&LOCAL_TZ))
        }
    }
}
