//! Public holiday calendars used by the tariff classification.
//!
//! The aggregator only needs `is_holiday(date)`, so the calendar is injected as
//! a trait object and can be replaced in tests.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Answers whether a local calendar date is a public holiday.
pub trait HolidayCalendar: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Dutch national public holidays, computed from the calendar rules.
///
/// Good Friday is not a national day off and is not included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutchHolidays;

const EASTER_OFFSETS: [i64; 5] = [0, 1, 39, 49, 50];

impl DutchHolidays {
    /// All holidays of `year`, in date order.
    pub fn for_year(year: i32) -> Vec<NaiveDate> {
        let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|date| date.year() == year)
            .filter(|date| DutchHolidays.is_holiday(*date))
            .collect()
    }
}

impl HolidayCalendar for DutchHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        let year = date.year();
        let fixed = match (date.month(), date.day()) {
            (1, 1) | (12, 25) | (12, 26) => true,
            (5, 5) => year >= 1990 && year % 5 == 0,
            _ => false,
        };
        // Easter, Easter Monday, Ascension, Whit Sunday and Whit Monday.
        let moveable = easter_sunday(year)
            .is_some_and(|easter| EASTER_OFFSETS.contains(&(date - easter).num_days()));

        fixed || moveable || royal_day(year) == Some(date)
    }
}

/// King's Day (27 April, from 2014) or Queen's Day (30 April, 1980-2013);
/// both move one day earlier when they fall on a Sunday.
fn royal_day(year: i32) -> Option<NaiveDate> {
    let day = match year {
        2014.. => 27,
        1980..=2013 => 30,
        _ => return None,
    };
    let date = NaiveDate::from_ymd_opt(year, 4, day)?;
    if date.weekday() == Weekday::Sun {
        date.pred_opt()
    } else {
        Some(date)
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Calendar without holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Explicit list of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}
