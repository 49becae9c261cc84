use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Meter tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterConfig {
    /// How often the fare is recomputed while a journey is active (ms)
    pub tick_interval_ms: u64,
}

impl MeterConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
        }
    }
}
