use taximeter_core::Timestamp;

/// Port for the meter's time source
///
/// Journey start and end, elapsed time and tariff selection all read the
/// same clock, so swapping it (wall time, scaled demo time, or a clock a test
/// moves by hand) changes nothing else in the meter.
pub trait Clock: Send + Sync {
    /// Current instant according to this clock
    fn now(&self) -> Timestamp;

    /// Identifier used in logs
    fn name(&self) -> &str {
        "Clock"
    }
}
