//! Rate cards: tariff tables as JSON documents
//!
//! Two cards are embedded in the binary; custom cards can be loaded from a
//! file or string. Every card is validated when it is turned into a
//! [`TariffLookup`].

use std::path::Path;
use std::sync::Arc;

use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use taximeter_ports::HolidayCalendar;

use crate::error::{ConfigurationError, Result};
use crate::lookup::{LocalZone, TariffLookup};
use crate::tariff::Tariff;

const TFL_2016: &str = include_str!("rate_cards/tfl_2016.json");
const TFL_2017: &str = include_str!("rate_cards/tfl_2017.json");

/// A deployment's tariff table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Zone whose civil time the tariff filters see (IANA name)
    #[serde(default)]
    pub time_zone: Option<Tz>,
    /// Fixed offset used when no zone is named
    #[serde(default)]
    pub utc_offset_minutes: i32,
    pub tariffs: Vec<Tariff>,
}

impl RateCard {
    /// Load a rate card from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a rate card from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Names of the embedded rate cards
    pub fn embedded_names() -> &'static [&'static str] {
        &["tfl-2016", "tfl-2017"]
    }

    /// Load one of the embedded rate cards by name
    pub fn embedded(name: &str) -> Result<Self> {
        match name {
            "tfl-2016" => Self::from_json(TFL_2016),
            "tfl-2017" => Self::from_json(TFL_2017),
            other => Err(ConfigurationError::UnknownRateCard(other.to_string())),
        }
    }

    /// London tariffs in force before April 2017
    pub fn tfl_2016() -> Result<Self> {
        Self::embedded("tfl-2016")
    }

    /// London tariffs in force from April 2017
    pub fn tfl_2017() -> Result<Self> {
        Self::embedded("tfl-2017")
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigurationError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    /// The named zone if there is one, otherwise the fixed offset
    pub fn zone(&self) -> Result<LocalZone> {
        match self.time_zone {
            Some(tz) => Ok(LocalZone::Named(tz)),
            None => Ok(LocalZone::Offset(self.utc_offset()?)),
        }
    }

    /// Evaluate the filters at a fixed offset instead of the card's zone
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.time_zone = None;
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = Some(tz);
        self
    }

    /// Validate the card and build the lookup that resolves its tariffs
    pub fn into_lookup(self, calendar: Arc<dyn HolidayCalendar>) -> Result<TariffLookup> {
        let zone = self.zone()?;
        log::info!(
            "Loading rate card '{}' ({} tariffs, {})",
            self.name,
            self.tariffs.len(),
            zone
        );
        TariffLookup::with_zone(self.tariffs, calendar, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::NoHolidays;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::London;
    use rust_decimal_macros::dec;

    #[test]
    fn test_embedded_cards_load_and_partition() {
        for name in RateCard::embedded_names() {
            let card = RateCard::embedded(name).unwrap();
            assert_eq!(card.tariffs.len(), 3);
            assert!(card.into_lookup(Arc::new(NoHolidays)).is_ok());
        }
    }

    #[test]
    fn test_tfl_2017_parameters() {
        let card = RateCard::tfl_2017().unwrap();
        let tariff_1 = &card.tariffs[0];

        assert_eq!(tariff_1.name, "tariff-1");
        assert_eq!(tariff_1.flag_fall.amount, dec!(2.60));
        assert_eq!(tariff_1.flag_fall.distance_limit, dec!(234.8));
        assert_eq!(tariff_1.flag_fall.time_limit, dec!(50.4));
        assert_eq!(tariff_1.low_high_boundary, dec!(17.20));
        assert_eq!(tariff_1.low.distance_limit, dec!(117.4));
        assert_eq!(tariff_1.high.distance_limit, dec!(86.9));
    }

    #[test]
    fn test_tfl_2016_day_starts_at_six() {
        let lookup = RateCard::tfl_2016()
            .unwrap()
            .into_lookup(Arc::new(NoHolidays))
            .unwrap();

        let before_six = London.with_ymd_and_hms(2016, 9, 30, 5, 30, 0).unwrap();
        let after_six = London.with_ymd_and_hms(2016, 9, 30, 6, 30, 0).unwrap();

        assert_eq!(lookup.resolve(before_six.with_timezone(&Utc)).unwrap().name, "tariff-3");
        assert_eq!(lookup.resolve(after_six.with_timezone(&Utc)).unwrap().name, "tariff-1");
    }

    #[test]
    fn test_london_cards_use_london_time() {
        for name in RateCard::embedded_names() {
            let card = RateCard::embedded(name).unwrap();
            assert_eq!(card.time_zone, Some(London));
        }

        let lookup = RateCard::tfl_2017()
            .unwrap()
            .into_lookup(Arc::new(NoHolidays))
            .unwrap();
        // 19:30 UTC on a Friday in September is 20:30 in London
        let evening = Utc.with_ymd_and_hms(2017, 9, 29, 19, 30, 0).unwrap();
        assert_eq!(lookup.resolve(evening).unwrap().name, "tariff-2");

        // The same wall-clock hour in winter is still the day tariff
        let winter = Utc.with_ymd_and_hms(2017, 12, 1, 19, 30, 0).unwrap();
        assert_eq!(lookup.resolve(winter).unwrap().name, "tariff-1");
    }

    #[test]
    fn test_fixed_offset_overrides_zone() {
        let card = RateCard::tfl_2017().unwrap().with_utc_offset_minutes(0);
        assert_eq!(card.time_zone, None);
        let lookup = card.into_lookup(Arc::new(NoHolidays)).unwrap();

        let evening = Utc.with_ymd_and_hms(2017, 9, 29, 19, 30, 0).unwrap();
        assert_eq!(lookup.resolve(evening).unwrap().name, "tariff-1");
    }

    #[test]
    fn test_zone_name_from_json() {
        let json = TFL_2017.replace("\"Europe/London\"", "\"Europe/Dublin\"");
        let card = RateCard::from_json(&json).unwrap();
        assert_eq!(card.time_zone, Some(chrono_tz::Europe::Dublin));

        let json = TFL_2017.replace("\"Europe/London\"", "\"Mars/Olympus\"");
        assert!(matches!(
            RateCard::from_json(&json),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_card() {
        assert!(matches!(
            RateCard::embedded("tfl-1999"),
            Err(ConfigurationError::UnknownRateCard(_))
        ));
    }

    #[test]
    fn test_invalid_offset() {
        let card = RateCard::tfl_2017().unwrap().with_utc_offset_minutes(24 * 60);
        assert!(matches!(
            card.utc_offset(),
            Err(ConfigurationError::InvalidUtcOffset(1440))
        ));
    }

    #[test]
    fn test_huge_offset_is_rejected_not_overflowed() {
        let card = RateCard::tfl_2017().unwrap().with_utc_offset_minutes(i32::MAX);
        assert!(matches!(
            card.utc_offset(),
            Err(ConfigurationError::InvalidUtcOffset(i32::MAX))
        ));
        assert!(card.into_lookup(Arc::new(NoHolidays)).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RateCard::from_json("{ \"name\": \"broken\" }"),
            Err(ConfigurationError::Parse(_))
        ));
    }
}
