//! Peak/off-peak aggregation under the Dutch time-of-use schedule.
//!
//! Peak is Monday to Friday, 07:00 to 23:00 local time, except public
//! holidays. Every other hour is off-peak.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

use crate::holidays::{DutchHolidays, HolidayCalendar};
use crate::{AggregateResult, HourlyRecord, SeriesKind, LOCAL_TZ};

const PEAK_START_HOUR: u32 = 7;
const PEAK_END_HOUR: u32 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffBand {
    Peak,
    OffPeak,
}

impl TariffBand {
    pub fn classify<T: TimeZone>(instant: &DateTime<T>, calendar: &dyn HolidayCalendar) -> Self {
        let local = instant.with_timezone(&LOCAL_TZ);
        let weekday = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
        let in_hours = (PEAK_START_HOUR..PEAK_END_HOUR).contains(&local.hour());

        if weekday && in_hours && !calendar.is_holiday(local.date_naive()) {
            Self::Peak
        } else {
            Self::OffPeak
        }
    }
}

/// Sums one series into peak and off-peak buckets.
#[derive(Clone)]
pub struct PeakOffPeakAggregator {
    calendar: Arc<dyn HolidayCalendar>,
}

impl Default for PeakOffPeakAggregator {
    fn default() -> Self {
        Self::new(Arc::new(DutchHolidays))
    }
}

impl PeakOffPeakAggregator {
    pub fn new(calendar: Arc<dyn HolidayCalendar>) -> Self {
        Self { calendar }
    }

    pub fn classify(&self, record: &HourlyRecord) -> TariffBand {
        TariffBand::classify(&record.timestamp, self.calendar.as_ref())
    }

    /// Single pass over `records`; null values contribute zero.
    pub fn aggregate(&self, records: &[HourlyRecord], series: SeriesKind) -> AggregateResult {
        records
            .iter()
            .fold(AggregateResult::empty(series), |mut acc, record| {
                match self.classify(record) {
                    TariffBand::Peak => acc.peak_total += record.energy(),
                    TariffBand::OffPeak => acc.off_peak_total += record.energy(),
                }
                acc.cost_or_profit_total += record.money();
                acc
            })
    }
}
