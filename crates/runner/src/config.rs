use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taximeter_clock::TimeScale;
use taximeter_core::Timestamp;
use taximeter_meter::MeterConfig;
use taximeter_ports::HolidayCalendar;
use taximeter_tariff::{ConfigurationError, EnglandBankHolidays, HolidaySet, NoHolidays, RateCard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Rate card error: {0}")]
    RateCard(#[from] ConfigurationError),
}

/// Upper bound on `time_scale`: one simulated hour per wall-clock second
pub const MAX_TIME_SCALE: u32 = 3600;

/// Where public holidays come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidaySource {
    None,
    England,
    Dates(Vec<NaiveDate>),
}

/// Simulated journey settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Embedded rate card name, or a path to a rate card JSON file
    pub rate_card: String,
    /// Fare recomputation cadence (ms)
    pub tick_interval_ms: u64,
    /// Constant vehicle speed
    pub speed_kmh: Decimal,
    /// Wall-clock length of the run
    pub duration_secs: u64,
    /// Simulated seconds per wall-clock second
    pub time_scale: u32,
    /// Simulated start instant (now if absent)
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    pub holidays: HolidaySource,
}

/// Load runner configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunnerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<RunnerConfig, ConfigError> {
    let config: RunnerConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<RunnerConfig, ConfigError> {
    let default_config = include_str!("runner_config.json");
    load_config_from_str(default_config)
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.speed_kmh < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "speed_kmh must not be negative, got {}",
                self.speed_kmh
            )));
        }
        if self.time_scale == 0 || self.time_scale > MAX_TIME_SCALE {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be between 1 and {}, got {}",
                MAX_TIME_SCALE, self.time_scale
            )));
        }
        if self.rate_card.is_empty() {
            return Err(ConfigError::Invalid("rate_card must be set".into()));
        }
        Ok(())
    }

    pub fn meter_config(&self) -> MeterConfig {
        MeterConfig {
            tick_interval_ms: self.tick_interval_ms,
        }
    }

    pub fn clock_scale(&self) -> TimeScale {
        match self.time_scale {
            1 => TimeScale::Normal,
            n => TimeScale::Fast(n),
        }
    }

    /// The embedded card of that name, otherwise a card file at that path
    pub fn load_rate_card(&self) -> Result<RateCard, ConfigError> {
        let card = if RateCard::embedded_names().contains(&self.rate_card.as_str()) {
            RateCard::embedded(&self.rate_card)?
        } else {
            RateCard::load(&self.rate_card)?
        };
        Ok(card)
    }

    pub fn calendar(&self) -> Arc<dyn HolidayCalendar> {
        match &self.holidays {
            HolidaySource::None => Arc::new(NoHolidays),
            HolidaySource::England => Arc::new(EnglandBankHolidays),
            HolidaySource::Dates(dates) => Arc::new(HolidaySet::new(dates.iter().copied())),
        }
    }
}
