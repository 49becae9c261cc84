//! Journey state machine
//!
//! The meter owns the current fare and the poller that keeps it up to date.
//! Lifecycle calls come from the controller (any thread); the fare is
//! recomputed on the poller thread and published as an immutable snapshot.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use taximeter_core::{Fare, Journey, MeterState, Money, Timestamp};
use taximeter_ports::{Clock, Odometer};
use taximeter_tariff::{ConfigurationError, EnglandBankHolidays, RateCard};

use crate::calculator::FareCalculator;
use crate::config::MeterConfig;
use crate::error::{MeterError, RecomputeError, Result};
use crate::poller::{PollTarget, Poller, PollerStats};

/// Recomputes the fare of one journey on every tick
struct FareTicker {
    calculator: Arc<FareCalculator>,
    odometer: Arc<dyn Odometer>,
    clock: Arc<dyn Clock>,
    fare: Arc<ArcSwapOption<Fare>>,
    started_at: Timestamp,
}

impl PollTarget for FareTicker {
    fn poll(&self) -> std::result::Result<(), RecomputeError> {
        let now = self.clock.now();
        let distance = self.odometer.distance()?;
        let previous = self.fare.load_full().ok_or(RecomputeError::NoFare)?;
        let elapsed = Journey::start(self.started_at).elapsed_at(now);

        let fare = self
            .calculator
            .recompute(&previous, elapsed, distance, now)?;

        if !fare.same_amount(&previous) {
            log::debug!(
                "Fare {} -> {} after {}s, {}m",
                previous,
                fare,
                elapsed,
                distance
            );
            self.fare.store(Some(Arc::new(fare)));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fare"
    }
}

struct Inner {
    state: MeterState,
    journey: Option<Journey>,
    poller: Poller,
}

/// Taxi meter: one journey at a time
pub struct Meter {
    calculator: Arc<FareCalculator>,
    odometer: Arc<dyn Odometer>,
    clock: Arc<dyn Clock>,
    fare: Arc<ArcSwapOption<Fare>>,
    inner: Mutex<Inner>,
}

impl Meter {
    pub fn new(
        calculator: Arc<FareCalculator>,
        odometer: Arc<dyn Odometer>,
        clock: Arc<dyn Clock>,
        config: MeterConfig,
    ) -> Self {
        Self {
            calculator,
            odometer,
            clock,
            fare: Arc::new(ArcSwapOption::empty()),
            inner: Mutex::new(Inner {
                state: MeterState::Idle,
                journey: None,
                poller: Poller::new(config.tick_interval()),
            }),
        }
    }

    /// Meter priced with the 2017 London rate card, in London time, with
    /// England bank holidays
    pub fn tfl_2017(
        odometer: Arc<dyn Odometer>,
        clock: Arc<dyn Clock>,
        config: MeterConfig,
    ) -> std::result::Result<Self, ConfigurationError> {
        let lookup = RateCard::tfl_2017()?.into_lookup(Arc::new(EnglandBankHolidays))?;
        let calculator = Arc::new(FareCalculator::new(Arc::new(lookup)));
        Ok(Self::new(calculator, odometer, clock, config))
    }

    /// Start a journey: zero the odometer, charge flag-fall, start polling
    pub fn start_journey(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.state.can_start() {
            return Err(MeterError::InvalidState {
                operation: "start a journey",
                state: inner.state,
            });
        }

        self.odometer.reset();
        let started_at = self.clock.now();
        let flag_fall = self.calculator.flag_fall(started_at)?;
        log::info!("Journey started at {} with flag-fall {}", started_at, flag_fall);
        self.fare.store(Some(Arc::new(flag_fall)));

        let ticker = Arc::new(FareTicker {
            calculator: self.calculator.clone(),
            odometer: self.odometer.clone(),
            clock: self.clock.clone(),
            fare: self.fare.clone(),
            started_at,
        });
        if let Err(e) = inner.poller.start(ticker) {
            self.fare.store(None);
            return Err(e.into());
        }

        inner.journey = Some(Journey::start(started_at));
        inner.state = MeterState::Active;
        Ok(())
    }

    /// End the journey: stop polling and freeze the fare
    ///
    /// Blocks until any in-flight recomputation has finished.
    pub fn end_journey(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.state.can_end() {
            return Err(MeterError::InvalidState {
                operation: "end a journey",
                state: inner.state,
            });
        }

        inner.poller.stop();
        let ended_at = self.clock.now();
        inner.journey = inner.journey.map(|journey| journey.end(ended_at));
        inner.state = MeterState::Ended;

        log::info!(
            "Journey ended at {}, fare {}",
            ended_at,
            self.fare
                .load_full()
                .map(|fare| fare.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(())
    }

    /// Clear the journey and fare, ready for the next hiring
    pub fn reset(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.state.can_reset() {
            return Err(MeterError::InvalidState {
                operation: "reset",
                state: inner.state,
            });
        }

        inner.journey = None;
        self.fare.store(None);
        self.odometer.reset();
        inner.state = MeterState::Idle;
        log::info!("Meter reset");
        Ok(())
    }

    /// Last computed fare, if a journey has produced one
    pub fn current_fare(&self) -> Option<Fare> {
        self.fare.load_full().map(|fare| fare.as_ref().clone())
    }

    pub fn current_amount(&self) -> Option<Money> {
        self.fare.load().as_ref().map(|fare| fare.amount)
    }

    pub fn state(&self) -> MeterState {
        self.inner.lock().state
    }

    /// Start and end instants of the current or last journey
    pub fn journey(&self) -> Option<Journey> {
        self.inner.lock().journey
    }

    pub fn poller_stats(&self) -> PollerStats {
        self.inner.lock().poller.stats()
    }

    pub fn calculator(&self) -> &FareCalculator {
        &self.calculator
    }
}
