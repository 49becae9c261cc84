use thiserror::Error;

/// Failures reported by sensors sampled during a journey
///
/// These are expected to be transient: the next poll samples the sensor again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("Sensor unavailable: {0}")]
    Unavailable(String),

    #[error("Inconsistent sensor reading: {0}")]
    Inconsistent(String),
}

pub type SensorResult<T> = std::result::Result<T, SensorError>;
