use parking_lot::Mutex;
use rust_decimal::Decimal;
use taximeter_core::Metres;
use taximeter_ports::{Odometer, SensorError, SensorResult};

/// In-memory odometer driven by a simulation or a test
///
/// Distance is whatever the driver last set or accumulated. A failure can be
/// queued to be returned by the next read only.
#[derive(Debug, Default)]
pub struct SimulatedOdometer {
    distance: Mutex<Metres>,
    pending_failure: Mutex<Option<SensorError>>,
}

impl SimulatedOdometer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add travelled distance
    pub fn advance(&self, metres: Metres) {
        *self.distance.lock() += metres;
    }

    /// Overwrite the cumulative distance
    pub fn set(&self, metres: Metres) {
        *self.distance.lock() = metres;
    }

    /// Make the next `distance()` call fail with `error`
    pub fn fail_next(&self, error: SensorError) {
        *self.pending_failure.lock() = Some(error);
    }
}

impl Odometer for SimulatedOdometer {
    fn distance(&self) -> SensorResult<Metres> {
        if let Some(error) = self.pending_failure.lock().take() {
            return Err(error);
        }
        Ok(*self.distance.lock())
    }

    fn reset(&self) {
        *self.distance.lock() = Decimal::ZERO;
    }
}
