//! Tariff configuration errors

use thiserror::Error;

/// A tariff table that cannot price journeys correctly
///
/// Raised when a lookup is built (or, defensively, when it resolves). A meter
/// must not start with a configuration that produces one of these.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("No tariff applies at {at}")]
    NoTariff { at: String },

    #[error("Ambiguous schedule at {at}: {matches:?} all apply")]
    AmbiguousTariff { at: String, matches: Vec<String> },

    #[error("Invalid tariff {name}: {reason}")]
    InvalidTariff { name: String, reason: String },

    #[error("Tariff lookup has no tariffs")]
    EmptyLookup,

    #[error("Unknown rate card: {0}")]
    UnknownRateCard(String),

    #[error("Invalid UTC offset: {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("Failed to read rate card: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rate card: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
