//! Public holiday sources
//!
//! Tariff filters only see a yes/no answer per local date; these are the
//! implementations of that question.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use taximeter_ports::HolidayCalendar;

/// Calendar with no public holidays
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_public_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Explicit list of holiday dates
#[derive(Debug, Clone, Default)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for HolidaySet {
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Rule-based bank holidays for England and Wales
///
/// New Year's Day, Good Friday, Easter Monday, the early May, spring and
/// summer bank holidays, Christmas Day and Boxing Day. When a fixed-date
/// holiday falls at a weekend the following weekday(s) are substitute
/// holidays; the fixed date itself still counts. One-off proclamations
/// (jubilees, moved May holidays) are not modelled; add them with a
/// [`HolidaySet`] if needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglandBankHolidays;

impl EnglandBankHolidays {
    /// All holiday dates falling in a given year, sorted
    pub fn holidays_in(year: i32) -> Vec<NaiveDate> {
        let mut dates = BTreeSet::new();

        if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
            dates.insert(new_year);
            dates.insert(next_weekday(new_year));
        }

        if let Some(easter) = easter_sunday(year) {
            dates.insert(easter - Duration::days(2));
            dates.insert(easter + Duration::days(1));
        }

        dates.extend(first_monday(year, 5));
        dates.extend(last_monday(year, 5));
        dates.extend(last_monday(year, 8));

        if let (Some(christmas), Some(boxing_day)) = (
            NaiveDate::from_ymd_opt(year, 12, 25),
            NaiveDate::from_ymd_opt(year, 12, 26),
        ) {
            dates.insert(christmas);
            dates.insert(boxing_day);
            // Two consecutive days off, pushed past the weekend together
            let first_sub = next_weekday(christmas);
            let second_sub = next_weekday(std::cmp::max(boxing_day, first_sub + Duration::days(1)));
            dates.insert(first_sub);
            dates.insert(second_sub);
        }

        dates.into_iter().collect()
    }
}

impl HolidayCalendar for EnglandBankHolidays {
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        Self::holidays_in(date.year()).contains(&date)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The date itself if it is a weekday, otherwise the following Monday
fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while is_weekend(day) {
        day += Duration::days(1);
    }
    day
}

fn first_monday(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 - first.weekday().num_days_from_monday()) % 7;
    Some(first + Duration::days(offset as i64))
}

fn last_monday(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let offset = last.weekday().num_days_from_monday();
    Some(last - Duration::days(offset as i64))
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm)
fn easter_sunday(year: i32) -> Option<NaiveDate> {
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
