//! Taximeter Ports
//!
//! Port definitions (traits) for the taximeter fare engine.
//! These define the boundaries between fare logic and the sensors, clocks and
//! calendars it samples.

mod calendar;
mod clock;
mod error;
mod odometer;

pub use calendar::HolidayCalendar;
pub use clock::Clock;
pub use error::{SensorError, SensorResult};
pub use odometer::Odometer;
