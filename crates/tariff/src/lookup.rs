use std::sync::Arc;

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc, Weekday};
use chrono_tz::Tz;
use taximeter_core::Timestamp;
use taximeter_ports::HolidayCalendar;

use crate::error::{ConfigurationError, Result};
use crate::tariff::Tariff;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// How instants are turned into the local civil time filters see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    /// Same offset all year round
    Offset(FixedOffset),
    /// A named zone, daylight saving included
    Named(Tz),
}

impl LocalZone {
    pub fn local_time(&self, at: Timestamp) -> NaiveDateTime {
        match self {
            LocalZone::Offset(offset) => at.with_timezone(offset).naive_local(),
            LocalZone::Named(tz) => at.with_timezone(tz).naive_local(),
        }
    }
}

impl std::fmt::Display for LocalZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalZone::Offset(offset) => write!(f, "UTC{}", offset),
            LocalZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// The set of tariffs a deployment prices journeys with
///
/// Construction guarantees the filters partition the week: for every hour of
/// every weekday, holiday or not, exactly one tariff applies.
pub struct TariffLookup {
    tariffs: Vec<Tariff>,
    calendar: Arc<dyn HolidayCalendar>,
    zone: LocalZone,
}

impl std::fmt::Debug for TariffLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TariffLookup")
            .field("tariffs", &self.tariff_names())
            .field("zone", &self.zone)
            .finish()
    }
}

impl TariffLookup {
    /// Build a lookup evaluated in UTC
    pub fn new(tariffs: Vec<Tariff>, calendar: Arc<dyn HolidayCalendar>) -> Result<Self> {
        Self::with_utc_offset(tariffs, calendar, Utc.fix())
    }

    /// Build a lookup whose filters are evaluated in local time at `utc_offset`
    pub fn with_utc_offset(
        tariffs: Vec<Tariff>,
        calendar: Arc<dyn HolidayCalendar>,
        utc_offset: FixedOffset,
    ) -> Result<Self> {
        Self::with_zone(tariffs, calendar, LocalZone::Offset(utc_offset))
    }

    /// Build a lookup whose filters are evaluated in civil time of `tz`
    pub fn with_time_zone(
        tariffs: Vec<Tariff>,
        calendar: Arc<dyn HolidayCalendar>,
        tz: Tz,
    ) -> Result<Self> {
        Self::with_zone(tariffs, calendar, LocalZone::Named(tz))
    }

    pub fn with_zone(
        tariffs: Vec<Tariff>,
        calendar: Arc<dyn HolidayCalendar>,
        zone: LocalZone,
    ) -> Result<Self> {
        if tariffs.is_empty() {
            return Err(ConfigurationError::EmptyLookup);
        }
        for tariff in &tariffs {
            tariff.validate()?;
        }
        Self::check_partition(&tariffs)?;

        log::debug!(
            "Tariff lookup ready: {:?} in {}",
            tariffs.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            zone
        );

        Ok(Self {
            tariffs,
            calendar,
            zone,
        })
    }

    /// Verify exactly one tariff applies in every (weekday, hour, holiday) cell
    ///
    /// Filters only distinguish whole hours, weekdays and the holiday flag, so
    /// checking all 336 cells covers every possible instant.
    pub fn check_partition(tariffs: &[Tariff]) -> Result<()> {
        for day in WEEK {
            for hour in 0..24 {
                for is_holiday in [false, true] {
                    let matches: Vec<&str> = tariffs
                        .iter()
                        .filter(|t| t.filter.applies_at(day, hour, is_holiday))
                        .map(|t| t.name.as_str())
                        .collect();

                    let at = || {
                        format!(
                            "{} {:02}:00{}",
                            day,
                            hour,
                            if is_holiday { " (public holiday)" } else { "" }
                        )
                    };
                    match matches.len() {
                        1 => {}
                        0 => return Err(ConfigurationError::NoTariff { at: at() }),
                        _ => {
                            return Err(ConfigurationError::AmbiguousTariff {
                                at: at(),
                                matches: matches.into_iter().map(String::from).collect(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve the tariff that applies at an instant
    pub fn resolve(&self, at: Timestamp) -> Result<&Tariff> {
        let local = self.local_time(at);
        let is_holiday = self.calendar.is_public_holiday(local.date());

        let mut matching = self.tariffs.iter().filter(|t| t.applies(local, is_holiday));
        match (matching.next(), matching.next()) {
            (Some(tariff), None) => Ok(tariff),
            (None, _) => Err(ConfigurationError::NoTariff {
                at: local.to_string(),
            }),
            (Some(first), Some(second)) => {
                let mut matches = vec![first.name.clone(), second.name.clone()];
                matches.extend(matching.map(|t| t.name.clone()));
                Err(ConfigurationError::AmbiguousTariff {
                    at: local.to_string(),
                    matches,
                })
            }
        }
    }

    /// Local civil time the filters see for an instant
    pub fn local_time(&self, at: Timestamp) -> NaiveDateTime {
        self.zone.local_time(at)
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    pub fn tariffs(&self) -> &[Tariff] {
        &self.tariffs
    }

    pub fn tariff_names(&self) -> Vec<&str> {
        self.tariffs.iter().map(|t| t.name.as_str()).collect()
    }

    /// Find a tariff by name
    pub fn get(&self, name: &str) -> Option<&Tariff> {
        self.tariffs.iter().find(|t| t.name == name)
    }
}
