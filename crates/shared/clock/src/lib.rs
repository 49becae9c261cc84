//! Taximeter Clock Infrastructure
//!
//! Provides time sources for production, demos and tests:
//!
//! - [`SystemClock`]: wall-clock time
//! - [`SimulatedClock`]: wall-clock time scaled up, down, or frozen
//! - [`ManualClock`]: only moves when told to
//!
//! ## Usage
//!
//! ```ignore
//! use taximeter_clock::{ManualClock, SimulatedClock, TimeScale};
//! use chrono::Duration;
//!
//! // Deterministic tests: time stands still until advanced
//! let clock = ManualClock::new(start);
//! clock.advance(Duration::seconds(30));
//!
//! // Demos: a five-minute journey in five seconds
//! let clock = SimulatedClock::new(Some(start));
//! clock.set_time_scale(TimeScale::Fast(60));
//! ```

mod manual;
mod simulated;
mod system;

pub use manual::ManualClock;
pub use simulated::{SimulatedClock, TimeScale};
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use taximeter_ports::Clock;
