use serde::{Deserialize, Serialize};

use crate::values::Money;

/// Fare owed at a point in a journey
///
/// Immutable: every recomputation produces a new value that replaces the
/// previous one. Within a journey the amount never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fare {
    /// Amount owed so far
    pub amount: Money,
    /// Name of the tariff that priced this fare
    pub tariff: String,
}

impl Fare {
    pub fn new(amount: Money, tariff: impl Into<String>) -> Self {
        Self {
            amount,
            tariff: tariff.into(),
        }
    }

    /// True when both fares charge the same amount, whichever tariff priced them
    pub fn same_amount(&self, other: &Fare) -> bool {
        self.amount == other.amount
    }
}

impl std::fmt::Display for Fare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ({})", self.amount, self.tariff)
    }
}
