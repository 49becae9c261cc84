use chrono::NaiveDate;

/// Port for public holiday data
///
/// Only tariff applicability consults it; the fare engine never does.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if the given local date is a public holiday
    fn is_public_holiday(&self, date: NaiveDate) -> bool;
}
