use serde::{Deserialize, Serialize};

use crate::values::{Seconds, Timestamp, elapsed_seconds};

/// A single hiring, from flag-fall to the end of the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    /// When the journey started (set once)
    pub started_at: Timestamp,
    /// When the journey ended (None while in progress)
    pub ended_at: Option<Timestamp>,
}

impl Journey {
    /// Start a journey at the given instant
    pub fn start(started_at: Timestamp) -> Self {
        Self {
            started_at,
            ended_at: None,
        }
    }

    /// Finish the journey at the given instant
    pub fn end(self, ended_at: Timestamp) -> Self {
        Self {
            ended_at: Some(ended_at),
            ..self
        }
    }

    /// Returns true until the journey has been ended
    pub fn is_in_progress(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Seconds elapsed between the start and `now`
    pub fn elapsed_at(&self, now: Timestamp) -> Seconds {
        elapsed_seconds(self.started_at, now)
    }

    /// Total duration, once the journey has ended
    pub fn duration(&self) -> Option<Seconds> {
        self.ended_at.map(|end| self.elapsed_at(end))
    }
}
