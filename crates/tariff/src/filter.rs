//! Time-of-day applicability of a tariff
//!
//! Filters are pure data: a set of day/hour windows plus a rule for public
//! holidays. Windows are hour-granular, which makes it possible to check a
//! whole tariff table cell by cell (see [`crate::TariffLookup`]).

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Days of the week a window covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySet {
    /// Monday to Friday
    Weekdays,
    /// Saturday and Sunday
    Weekend,
    /// Every day
    Everyday,
}

impl DaySet {
    pub fn contains(&self, day: Weekday) -> bool {
        let weekend = matches!(day, Weekday::Sat | Weekday::Sun);
        match self {
            DaySet::Weekdays => !weekend,
            DaySet::Weekend => weekend,
            DaySet::Everyday => true,
        }
    }
}

/// A recurring stretch of hours on a set of days
///
/// Half-open: `from_hour` is included, `to_hour` is not. `to_hour` may be 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub days: DaySet,
    pub from_hour: u32,
    pub to_hour: u32,
}

impl DayWindow {
    pub fn new(days: DaySet, from_hour: u32, to_hour: u32) -> Self {
        Self {
            days,
            from_hour,
            to_hour,
        }
    }

    pub fn contains(&self, day: Weekday, hour: u32) -> bool {
        self.days.contains(day) && self.from_hour <= hour && hour < self.to_hour
    }

    /// Check the window describes a non-empty stretch within one day
    pub fn validate(&self) -> Result<(), String> {
        if self.to_hour > 24 {
            return Err(format!("window ends at hour {} (max 24)", self.to_hour));
        }
        if self.from_hour >= self.to_hour {
            return Err(format!(
                "window {:02}:00-{:02}:00 is empty",
                self.from_hour, self.to_hour
            ));
        }
        Ok(())
    }
}

/// How a filter treats public holidays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayRule {
    /// Never applies on a public holiday, whatever the windows say
    Exclude,
    /// Applies all day on a public holiday, whatever the windows say
    Include,
    /// Holidays are treated like any other day
    #[default]
    Ignore,
}

/// Decides whether a tariff applies at a given local time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffTimeFilter {
    pub windows: Vec<DayWindow>,
    #[serde(default)]
    pub holidays: HolidayRule,
}

impl TariffTimeFilter {
    pub fn new(windows: Vec<DayWindow>, holidays: HolidayRule) -> Self {
        Self { windows, holidays }
    }

    /// Check applicability at a local date/time
    pub fn applies(&self, local: NaiveDateTime, is_holiday: bool) -> bool {
        self.applies_at(local.weekday(), local.hour(), is_holiday)
    }

    /// Check applicability for an hour cell of the week
    pub fn applies_at(&self, day: Weekday, hour: u32, is_holiday: bool) -> bool {
        if is_holiday {
            match self.holidays {
                HolidayRule::Include => return true,
                HolidayRule::Exclude => return false,
                HolidayRule::Ignore => {}
            }
        }
        self.windows.iter().any(|w| w.contains(day, hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    fn weekday_daytime() -> TariffTimeFilter {
        TariffTimeFilter::new(
            vec![DayWindow::new(DaySet::Weekdays, 5, 20)],
            HolidayRule::Exclude,
        )
    }

    #[test]
    fn test_window_is_half_open() {
        let filter = weekday_daytime();

        // Friday 29 September 2017
        assert!(!filter.applies(at(2017, 9, 29, 4, 59), false));
        assert!(filter.applies(at(2017, 9, 29, 5, 0), false));
        assert!(filter.applies(at(2017, 9, 29, 19, 59), false));
        assert!(!filter.applies(at(2017, 9, 29, 20, 0), false));
    }

    #[test]
    fn test_weekday_window_skips_weekend() {
        let filter = weekday_daytime();

        // Saturday 30 September 2017
        assert!(!filter.applies(at(2017, 9, 30, 12, 0), false));
    }

    #[test]
    fn test_holiday_rules() {
        let excluded = weekday_daytime();
        assert!(!excluded.applies(at(2017, 12, 25, 12, 0), true));

        let included = TariffTimeFilter::new(
            vec![DayWindow::new(DaySet::Everyday, 22, 24)],
            HolidayRule::Include,
        );
        assert!(included.applies(at(2017, 12, 25, 12, 0), true));
        assert!(!included.applies(at(2017, 12, 27, 12, 0), false));

        let ignored = TariffTimeFilter::new(
            vec![DayWindow::new(DaySet::Everyday, 0, 24)],
            HolidayRule::Ignore,
        );
        assert!(ignored.applies(at(2017, 12, 25, 12, 0), true));
    }

    #[test]
    fn test_window_validation() {
        assert!(DayWindow::new(DaySet::Everyday, 22, 24).validate().is_ok());
        assert!(DayWindow::new(DaySet::Everyday, 22, 25).validate().is_err());
        assert!(DayWindow::new(DaySet::Everyday, 6, 6).validate().is_err());
    }

    #[test]
    fn test_filter_deserializes_from_snake_case() {
        let json = r#"{
            "windows": [{ "days": "weekend", "from_hour": 5, "to_hour": 22 }],
            "holidays": "exclude"
        }"#;
        let filter: TariffTimeFilter = serde_json::from_str(json).unwrap();

        assert_eq!(filter.windows[0].days, DaySet::Weekend);
        assert_eq!(filter.holidays, HolidayRule::Exclude);
    }
}
