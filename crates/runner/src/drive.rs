//! Simulated vehicle movement
//!
//! Advances the odometer at a constant speed. Distance per tick accounts for
//! the clock's time scale so distance and simulated time stay consistent.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taximeter_core::Metres;
use taximeter_meter::SimulatedOdometer;

pub struct JourneyDriver {
    odometer: Arc<SimulatedOdometer>,
    step: Metres,
    interval: Duration,
}

impl JourneyDriver {
    pub fn new(
        odometer: Arc<SimulatedOdometer>,
        speed_kmh: Decimal,
        time_scale: u32,
        interval: Duration,
    ) -> Self {
        Self {
            odometer,
            step: Self::metres_per_tick(speed_kmh, time_scale, interval),
            interval,
        }
    }

    /// Simulated metres covered during one wall-clock interval
    pub fn metres_per_tick(speed_kmh: Decimal, time_scale: u32, interval: Duration) -> Metres {
        let metres_per_second = speed_kmh * dec!(1000) / dec!(3600);
        let seconds = Decimal::from(interval.as_millis() as u64) / dec!(1000);
        (metres_per_second * seconds * Decimal::from(time_scale)).round_dp(3)
    }

    pub fn step(&self) -> Metres {
        self.step
    }

    /// Advance the odometer once
    pub fn tick(&self) {
        self.odometer.advance(self.step);
    }

    /// Run until the task is aborted
    pub async fn run(self) {
        log::info!(
            "Journey driver started ({:?} interval, {}m per tick)",
            self.interval,
            self.step
        );
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            self.tick();
        }
    }
}
