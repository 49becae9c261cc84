//! Taximeter - Fare Accrual Engine
//!
//! Tracks a journey and keeps the fare owed up to date:
//!
//! - **FareCalculator**: flag-fall and the replay of increments from cumulative totals
//! - **Poller**: dedicated thread that triggers recomputation on a fixed cadence
//! - **Meter**: journey state machine publishing the current fare
//!
//! ## Data flow
//!
//! ```text
//!   Clock ──┐
//!           ├──► Poller tick ──► FareCalculator::recompute ──► Fare
//! Odometer ─┘                                                   │
//!                                              ArcSwapOption ◄──┘
//!                                                   │
//!                                          Meter::current_fare()
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!   Idle ──start_journey──► Active ──end_journey──► Ended
//!    ▲                                                │
//!    └──────────────────────── reset ─────────────────┘
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod meter;
pub mod odometer;
pub mod poller;

// Re-export main types
pub use calculator::{Accrual, FareCalculator};
pub use config::MeterConfig;
pub use error::{MeterError, PollerError, RecomputeError, Result};
pub use meter::Meter;
pub use odometer::SimulatedOdometer;
pub use poller::{PollTarget, Poller, PollerStats};
