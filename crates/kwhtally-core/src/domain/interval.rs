use std::fmt::{Display, Formatter};

use chrono::{DateTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::ConfigError;

/// Fixed tariff timezone. Every interval and classification is evaluated here.
pub const LOCAL_TZ: Tz = chrono_tz::Europe::Amsterdam;

/// Half-open `[start, end)` range expressed in [`LOCAL_TZ`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateInterval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl DateInterval {
    pub fn new<A: TimeZone, B: TimeZone>(
        start: DateTime<A>,
        end: DateTime<B>,
    ) -> Result<Self, ConfigError> {
        let start = start.with_timezone(&LOCAL_TZ);
        let end = end.with_timezone(&LOCAL_TZ);
        if start >= end {
            return Err(ConfigError::invalid_argument(format!(
                "interval start {} must be before end {}",
                format_rfc3339(&start),
                format_rfc3339(&end)
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn contains<T: TimeZone>(&self, instant: &DateTime<T>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// Start as ISO-8601 with UTC offset, e.g. `2024-03-01T00:00:00+01:00`.
    pub fn start_rfc3339(&self) -> String {
        format_rfc3339(&self.start)
    }

    pub fn end_rfc3339(&self) -> String {
        format_rfc3339(&self.end)
    }

    /// Start as a local date-only string, e.g. `2024-03-01`.
    pub fn start_date_string(&self) -> String {
        self.start.date_naive().format("%Y-%m-%d").to_string()
    }

    pub fn end_date_string(&self) -> String {
        self.end.date_naive().format("%Y-%m-%d").to_string()
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_rfc3339(), self.end_rfc3339())
    }
}

pub(crate) fn format_rfc3339<T: TimeZone>(instant: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}
