use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taximeter_core::{Metres, Money, Seconds};

use crate::error::{ConfigurationError, Result};
use crate::filter::TariffTimeFilter;

/// Minimum charge at the start of a journey
///
/// Covers the journey until cumulative distance or cumulative time reaches its
/// limit, whichever happens first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagFall {
    pub amount: Money,
    pub distance_limit: Metres,
    pub time_limit: Seconds,
}

impl FlagFall {
    pub fn new(amount: Money, distance_limit: Metres, time_limit: Seconds) -> Self {
        Self {
            amount,
            distance_limit,
            time_limit,
        }
    }

    /// Returns true while neither limit has been reached
    pub fn covers(&self, elapsed: Seconds, distance: Metres) -> bool {
        distance < self.distance_limit && elapsed < self.time_limit
    }
}

/// Increment regime: one charge per distance or time unit, whichever first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub distance_limit: Metres,
    pub time_limit: Seconds,
    pub increment: Money,
}

impl Tier {
    pub fn new(distance_limit: Metres, time_limit: Seconds, increment: Money) -> Self {
        Self {
            distance_limit,
            time_limit,
            increment,
        }
    }

    /// Returns true when either counter has reached a full unit
    pub fn fires(&self, distance: Metres, elapsed: Seconds) -> bool {
        distance >= self.distance_limit || elapsed >= self.time_limit
    }
}

/// Which tier governs the next increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierKind {
    /// Fare below the low/high boundary
    Low,
    /// Fare at or above the low/high boundary
    High,
}

/// A complete pricing schedule and the times it applies
///
/// Built once from a rate card and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    pub name: String,
    pub flag_fall: FlagFall,
    /// Fare at which increments switch from the low to the high tier
    pub low_high_boundary: Money,
    pub low: Tier,
    pub high: Tier,
    pub filter: TariffTimeFilter,
}

impl Tariff {
    pub fn new(
        name: impl Into<String>,
        flag_fall: FlagFall,
        low_high_boundary: Money,
        low: Tier,
        high: Tier,
        filter: TariffTimeFilter,
    ) -> Self {
        Self {
            name: name.into(),
            flag_fall,
            low_high_boundary,
            low,
            high,
            filter,
        }
    }

    /// Check applicability at a local date/time
    pub fn applies(&self, local: NaiveDateTime, is_holiday: bool) -> bool {
        self.filter.applies(local, is_holiday)
    }

    /// Tier governing the next increment once the fare stands at `fare`
    pub fn tier_kind(&self, fare: Money) -> TierKind {
        if fare >= self.low_high_boundary {
            TierKind::High
        } else {
            TierKind::Low
        }
    }

    pub fn tier(&self, kind: TierKind) -> &Tier {
        match kind {
            TierKind::Low => &self.low,
            TierKind::High => &self.high,
        }
    }

    /// Check every amount and limit is usable
    ///
    /// Zero limits would let a single reading fire increments forever, so
    /// every limit and charge must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("flag-fall amount", self.flag_fall.amount),
            ("flag-fall distance limit", self.flag_fall.distance_limit),
            ("flag-fall time limit", self.flag_fall.time_limit),
            ("low/high boundary", self.low_high_boundary),
            ("low tier distance limit", self.low.distance_limit),
            ("low tier time limit", self.low.time_limit),
            ("low tier increment", self.low.increment),
            ("high tier distance limit", self.high.distance_limit),
            ("high tier time limit", self.high.time_limit),
            ("high tier increment", self.high.increment),
        ];
        if let Some((field, value)) = positive.iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(self.invalid(format!("{} must be positive, got {}", field, value)));
        }

        if self.filter.windows.is_empty() {
            return Err(self.invalid("time filter has no windows".to_string()));
        }
        for window in &self.filter.windows {
            window.validate().map_err(|reason| self.invalid(reason))?;
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> ConfigurationError {
        ConfigurationError::InvalidTariff {
            name: self.name.clone(),
            reason,
        }
    }
}
