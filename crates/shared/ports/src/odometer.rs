use taximeter_core::Metres;

use crate::error::SensorResult;

/// Port for the distance sensor
///
/// Reports cumulative distance travelled since the last reset. The meter resets
/// it once per journey and samples it on every poll.
pub trait Odometer: Send + Sync {
    /// Cumulative distance since the last reset
    fn distance(&self) -> SensorResult<Metres>;

    /// Zero the cumulative distance
    fn reset(&self);
}
