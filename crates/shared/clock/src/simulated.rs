use chrono::{Duration, Utc};
use parking_lot::RwLock;
use taximeter_core::Timestamp;
use taximeter_ports::Clock;

fn clamp(factor: u32) -> i32 {
    i32::try_from(factor).unwrap_or(i32::MAX)
}

/// Time scale modes for simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeScale {
    /// Real-time (1:1 ratio with wall clock)
    #[default]
    Normal,
    /// Accelerated time (multiplier applied to elapsed time)
    Fast(u32),
    /// Decelerated time (divisor applied to elapsed time)
    Slow(u32),
    /// Fixed time (only advances when explicitly moved)
    Fixed,
}

impl TimeScale {
    /// Convert a stretch of wall-clock time into simulated time
    fn scale(&self, real_elapsed: Duration) -> Duration {
        match *self {
            TimeScale::Normal => real_elapsed,
            TimeScale::Fast(multiplier) => real_elapsed * clamp(multiplier),
            TimeScale::Slow(0) => Duration::zero(),
            TimeScale::Slow(divisor) => real_elapsed / clamp(divisor),
            TimeScale::Fixed => Duration::zero(),
        }
    }

    /// Largest multiplier or divisor honoured; larger values are clamped
    pub const MAX_FACTOR: u32 = i32::MAX as u32;

    /// How many simulated seconds pass per wall-clock second
    pub fn factor(&self) -> f64 {
        match *self {
            TimeScale::Normal => 1.0,
            TimeScale::Fast(multiplier) => multiplier as f64,
            TimeScale::Slow(0) | TimeScale::Fixed => 0.0,
            TimeScale::Slow(divisor) => 1.0 / divisor as f64,
        }
    }
}

/// Pairing of a wall-clock instant with the simulated instant it maps to
#[derive(Debug, Clone, Copy)]
struct Anchor {
    real: Timestamp,
    sim: Timestamp,
    scale: TimeScale,
}

impl Anchor {
    fn sim_at(&self, real_now: Timestamp) -> Timestamp {
        self.sim + self.scale.scale(real_now - self.real)
    }
}

/// Simulation clock derived from wall time
///
/// Simulated time runs at a configurable rate relative to the wall clock,
/// starting from an arbitrary instant. Changing the scale re-anchors the clock
/// so time stays continuous.
pub struct SimulatedClock {
    anchor: RwLock<Anchor>,
}

impl SimulatedClock {
    /// Create a new simulated clock
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    pub fn new(initial_time: Option<Timestamp>) -> Self {
        let real = Utc::now();
        Self {
            anchor: RwLock::new(Anchor {
                real,
                sim: initial_time.unwrap_or(real),
                scale: TimeScale::Normal,
            }),
        }
    }

    /// Set the time scale
    pub fn set_time_scale(&self, scale: TimeScale) {
        let mut anchor = self.anchor.write();
        let real = Utc::now();
        let sim = anchor.sim_at(real);
        *anchor = Anchor { real, sim, scale };
    }

    /// Get the current time scale
    pub fn time_scale(&self) -> TimeScale {
        self.anchor.read().scale
    }

    /// Advance the simulated time by a specified duration
    pub fn advance(&self, duration: Duration) {
        self.anchor.write().sim += duration;
    }

    /// Explicitly set the simulation time
    ///
    /// Warning: This can cause time discontinuities (and a backwards jump
    /// mid-journey is reported by the meter as an inconsistent reading).
    pub fn set_time(&self, time: Timestamp) {
        let mut anchor = self.anchor.write();
        anchor.real = Utc::now();
        anchor.sim = time;
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Timestamp {
        self.anchor.read().sim_at(Utc::now())
    }

    fn name(&self) -> &str {
        "SimulatedClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_simulated_clock_creation() {
        let clock = SimulatedClock::new(None);
        let time1 = clock.now();
        let time2 = clock.now();
        assert!(time2 >= time1);
    }

    #[test]
    fn test_fixed_mode() {
        let start = Utc.with_ymd_and_hms(2017, 9, 29, 9, 0, 0).unwrap();
        let clock = SimulatedClock::new(Some(start));
        clock.set_time_scale(TimeScale::Fixed);

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        // In fixed mode, time should not advance automatically
        assert_eq!(time1, time2);

        // Advance manually
        clock.advance(Duration::seconds(5));
        let time3 = clock.now();
        assert_eq!(time3 - time1, Duration::seconds(5));
    }

    #[test]
    fn test_fast_mode_runs_ahead_of_wall_clock() {
        let start = Utc.with_ymd_and_hms(2017, 9, 29, 9, 0, 0).unwrap();
        let clock = SimulatedClock::new(Some(start));
        clock.set_time_scale(TimeScale::Fast(100));

        std::thread::sleep(std::time::Duration::from_millis(20));

        // 20ms of wall time is at least 2s of simulated time
        assert!(clock.now() - start >= Duration::seconds(2));
    }

    #[test]
    fn test_oversized_scale_never_runs_backwards() {
        let second = Duration::seconds(1);

        assert!(TimeScale::Fast(u32::MAX).scale(second) > Duration::zero());
        assert!(TimeScale::Slow(u32::MAX).scale(second) >= Duration::zero());
        assert_eq!(
            TimeScale::Fast(u32::MAX).scale(second),
            TimeScale::Fast(TimeScale::MAX_FACTOR).scale(second)
        );
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(TimeScale::Normal.factor(), 1.0);
        assert_eq!(TimeScale::Fast(60).factor(), 60.0);
        assert_eq!(TimeScale::Slow(4).factor(), 0.25);
        assert_eq!(TimeScale::Fixed.factor(), 0.0);
    }
}
