use serde::{Deserialize, Serialize};

/// Meter lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeterState {
    /// No journey; ready to start one
    #[default]
    Idle,
    /// Journey in progress, fare accruing
    Active,
    /// Journey finished, fare frozen until reset
    Ended,
}

impl MeterState {
    /// Returns true if a journey may be started
    pub fn can_start(&self) -> bool {
        matches!(self, MeterState::Idle)
    }

    /// Returns true if the current journey may be ended
    pub fn can_end(&self) -> bool {
        matches!(self, MeterState::Active)
    }

    /// Returns true if the meter may be reset
    pub fn can_reset(&self) -> bool {
        matches!(self, MeterState::Idle | MeterState::Ended)
    }
}

impl std::fmt::Display for MeterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeterState::Idle => write!(f, "Idle"),
            MeterState::Active => write!(f, "Active"),
            MeterState::Ended => write!(f, "Ended"),
        }
    }
}
