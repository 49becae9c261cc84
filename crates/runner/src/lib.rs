//! Taximeter Runner
//!
//! Hosts a meter for a simulated journey:
//!
//! - **config**: JSON runner settings (rate card, speed, time scale, holidays)
//! - **drive**: tokio task moving the simulated odometer
//! - **Session**: the meter wired to its clock and odometer

pub mod config;
pub mod drive;

use std::sync::Arc;

use taximeter_clock::{Clock, SimulatedClock, SystemClock};
use taximeter_meter::{FareCalculator, Meter, SimulatedOdometer};

pub use config::{ConfigError, HolidaySource, RunnerConfig};
pub use drive::JourneyDriver;

/// A meter and the simulated sensors feeding it
pub struct Session {
    pub meter: Arc<Meter>,
    pub clock: Arc<dyn Clock>,
    pub odometer: Arc<SimulatedOdometer>,
}

impl Session {
    pub fn build(config: &RunnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let card = config.load_rate_card()?;
        log::info!(
            "Rate card {} ({} tariffs)",
            card.name,
            card.tariffs.len()
        );
        let lookup = card.into_lookup(config.calendar())?;
        let calculator = Arc::new(FareCalculator::new(Arc::new(lookup)));

        let clock = Self::clock(config);
        log::info!("Using {} starting at {}", clock.name(), clock.now());
        let odometer = Arc::new(SimulatedOdometer::new());

        let meter = Arc::new(Meter::new(
            calculator,
            odometer.clone(),
            clock.clone(),
            config.meter_config(),
        ));

        Ok(Self {
            meter,
            clock,
            odometer,
        })
    }

    /// Wall time for an unscaled run from now, simulated time otherwise
    fn clock(config: &RunnerConfig) -> Arc<dyn Clock> {
        if config.start_time.is_none() && config.time_scale == 1 {
            return Arc::new(SystemClock::new());
        }
        let clock = SimulatedClock::new(config.start_time);
        clock.set_time_scale(config.clock_scale());
        Arc::new(clock)
    }

    pub fn driver(&self, config: &RunnerConfig) -> JourneyDriver {
        JourneyDriver::new(
            self.odometer.clone(),
            config.speed_kmh,
            config.time_scale,
            config.meter_config().tick_interval(),
        )
    }
}
