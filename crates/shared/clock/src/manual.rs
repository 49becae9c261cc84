use chrono::Duration;
use parking_lot::RwLock;
use taximeter_core::Timestamp;
use taximeter_ports::Clock;

/// Clock that only moves when explicitly set or advanced
///
/// Safe to share between the test thread driving it and the poller thread
/// reading it.
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(initial_time: Timestamp) -> Self {
        Self {
            current: RwLock::new(initial_time),
        }
    }

    /// Move time forward (or backward, with a negative duration)
    pub fn advance(&self, duration: Duration) {
        *self.current.write() += duration;
    }

    /// Jump to an explicit instant
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
