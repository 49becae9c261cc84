//! Taximeter Core Domain
//!
//! Pure domain types for the taximeter fare engine.
//! This crate contains no threads, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Fare, Journey, MeterState};
pub use values::{Metres, Money, Seconds, Timestamp, elapsed_seconds};
