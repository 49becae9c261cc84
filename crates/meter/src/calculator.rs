//! Fare accrual
//!
//! The fare is never updated incrementally. Every recomputation replays the
//! whole journey from zero using only cumulative elapsed time, cumulative
//! distance and the tariff in force, so it is idempotent and does not depend
//! on how often it runs.
//!
//! ## Replay
//!
//! 1. While distance and time are both under the flag-fall limits, the fare is
//!    the flag-fall amount.
//! 2. Reaching either limit charges the first increment ("or part thereof").
//! 3. The remaining distance and time are then consumed one unit at a time.
//!    A unit completes when either counter reaches the governing tier's
//!    limit; both counters then drop by one unit of that tier (never below
//!    zero) and the tier's increment is charged.
//! 4. The governing tier is re-evaluated after every charge: low while the
//!    fare is under the boundary, high from the boundary on.
//!
//! Step 3 is evaluated per tier rather than per unit. Under one tier the
//! number of units is `max(floor(distance / d), floor(time / t))`; the low
//! tier is additionally capped by the charges left before the boundary. Cost
//! is therefore independent of how large the readings are.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use taximeter_core::{Fare, Metres, Money, Seconds, Timestamp};
use taximeter_tariff::{Tariff, TariffLookup, Tier, TierKind};

use crate::error::RecomputeError;

/// How a fare was built up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accrual {
    /// Tariff the journey was priced with
    pub tariff: String,
    pub flag_fall: Money,
    pub low_increments: u64,
    pub high_increments: u64,
    pub total: Money,
}

impl Accrual {
    fn new(tariff: &Tariff) -> Self {
        Self {
            tariff: tariff.name.clone(),
            flag_fall: tariff.flag_fall.amount,
            low_increments: 0,
            high_increments: 0,
            total: tariff.flag_fall.amount,
        }
    }

    fn charge(&mut self, kind: TierKind, units: u64, increment: Money) {
        match kind {
            TierKind::Low => self.low_increments = self.low_increments.saturating_add(units),
            TierKind::High => self.high_increments = self.high_increments.saturating_add(units),
        }
        self.total = self
            .total
            .saturating_add(increment.saturating_mul(Decimal::from(units)));
    }

    pub fn increments(&self) -> u64 {
        self.low_increments.saturating_add(self.high_increments)
    }
}

/// Prices journeys against a tariff lookup
#[derive(Debug)]
pub struct FareCalculator {
    lookup: Arc<TariffLookup>,
}

impl FareCalculator {
    pub fn new(lookup: Arc<TariffLookup>) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &TariffLookup {
        &self.lookup
    }

    /// Initial fare of a journey starting at `started_at`
    pub fn flag_fall(&self, started_at: Timestamp) -> Result<Fare, RecomputeError> {
        let tariff = self.lookup.resolve(started_at)?;
        Ok(Fare::new(tariff.flag_fall.amount, tariff.name.as_str()))
    }

    /// Fare owed after `elapsed` seconds and `distance` metres, priced at `now`
    ///
    /// The tariff is the one in force at `now`, which can differ from the one
    /// the journey started under. The previous fare is a floor: switching to
    /// a cheaper schedule mid-journey never lowers what is already owed.
    pub fn recompute(
        &self,
        previous: &Fare,
        elapsed: Seconds,
        distance: Metres,
        now: Timestamp,
    ) -> Result<Fare, RecomputeError> {
        if elapsed < Decimal::ZERO {
            return Err(RecomputeError::NegativeElapsed(elapsed));
        }
        if distance < Decimal::ZERO {
            return Err(RecomputeError::NegativeDistance(distance));
        }

        let tariff = self.lookup.resolve(now)?;
        let accrual = Self::accrue(tariff, elapsed, distance);

        if accrual.total <= previous.amount {
            return Ok(previous.clone());
        }
        Ok(Fare::new(accrual.total, accrual.tariff))
    }

    /// Breakdown of the fare under the tariff in force at `now`
    pub fn breakdown(
        &self,
        elapsed: Seconds,
        distance: Metres,
        now: Timestamp,
    ) -> Result<Accrual, RecomputeError> {
        let tariff = self.lookup.resolve(now)?;
        Ok(Self::accrue(tariff, elapsed.max(Decimal::ZERO), distance.max(Decimal::ZERO)))
    }

    /// Replay a journey under a single tariff
    pub fn accrue(tariff: &Tariff, elapsed: Seconds, distance: Metres) -> Accrual {
        let flag_fall = &tariff.flag_fall;
        let mut accrual = Accrual::new(tariff);

        if flag_fall.covers(elapsed, distance) {
            return accrual;
        }

        // Leaving the flag-fall window opens the first unit
        let kind = tariff.tier_kind(accrual.total);
        accrual.charge(kind, 1, tariff.tier(kind).increment);

        let mut distance_left = (distance - flag_fall.distance_limit).max(Decimal::ZERO);
        let mut time_left = (elapsed - flag_fall.time_limit).max(Decimal::ZERO);

        if tariff.tier_kind(accrual.total) == TierKind::Low {
            let low = &tariff.low;
            let until_boundary =
                ((tariff.low_high_boundary - accrual.total) / low.increment).ceil();
            let units = whole_units(distance_left, time_left, low).min(until_boundary);

            distance_left = consume(distance_left, low.distance_limit, units);
            time_left = consume(time_left, low.time_limit, units);
            accrual.charge(TierKind::Low, to_count(units), low.increment);

            if units < until_boundary {
                return accrual;
            }
        }

        let high = &tariff.high;
        let units = whole_units(distance_left, time_left, high);
        accrual.charge(TierKind::High, to_count(units), high.increment);

        accrual
    }
}

/// Units a tier fires for the given counters, ignoring the boundary
fn whole_units(distance: Metres, elapsed: Seconds, tier: &Tier) -> Decimal {
    let by_distance = distance.checked_div(tier.distance_limit).unwrap_or(Decimal::MAX);
    let by_time = elapsed.checked_div(tier.time_limit).unwrap_or(Decimal::MAX);
    by_distance.max(by_time).floor()
}

/// Counter left after `units` units of `limit`, never below zero
fn consume(left: Decimal, limit: Decimal, units: Decimal) -> Decimal {
    match limit.checked_mul(units) {
        Some(used) => (left - used).max(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

fn to_count(units: Decimal) -> u64 {
    units.to_u64().unwrap_or(u64::MAX)
}
