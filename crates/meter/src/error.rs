//! Meter errors

use taximeter_core::{MeterState, Metres, Seconds};
use taximeter_ports::SensorError;
use taximeter_tariff::ConfigurationError;
use thiserror::Error;

/// Failure of a single fare recomputation
///
/// Never fatal: the poller records it and tries again on the next tick.
#[derive(Error, Debug)]
pub enum RecomputeError {
    #[error("Sensor failure: {0}")]
    Sensor(#[from] SensorError),

    #[error("Tariff resolution failed: {0}")]
    Tariff(#[from] ConfigurationError),

    #[error("Elapsed time went negative: {0}s")]
    NegativeElapsed(Seconds),

    #[error("Distance went negative: {0}m")]
    NegativeDistance(Metres),

    #[error("No fare to recompute from")]
    NoFare,

    #[error("Recomputation panicked: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Poller already running")]
    AlreadyRunning,

    #[error("Failed to spawn poller thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MeterError {
    #[error("Cannot {operation} while the meter is {state}")]
    InvalidState {
        operation: &'static str,
        state: MeterState,
    },

    #[error("Poller error: {0}")]
    Poller(#[from] PollerError),

    #[error("Flag-fall failed: {0}")]
    FlagFall(#[from] RecomputeError),
}

pub type Result<T> = std::result::Result<T, MeterError>;
