use chrono::{SubsecRound, Utc};
use taximeter_core::Timestamp;
use taximeter_ports::Clock;

/// Wall-clock time for a meter fitted to a real vehicle
///
/// Readings are truncated to whole milliseconds, the precision elapsed
/// journey time is measured in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().trunc_subsecs(3)
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
