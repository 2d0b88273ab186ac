use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Amount;

/// A named savings target. Progress is not stored here: every goal is
/// measured against the same pooled savings total of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target: Amount,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target: Amount) -> Self {
        Self {
            name: name.into(),
            target,
            created_at: Utc::now(),
        }
    }
}

/// Progress of a goal against the savings pool, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    pub name: String,
    pub target: Amount,
    pub saved: Amount,
    /// Raw percentage, may exceed 100
    pub percentage: f64,
}

impl GoalStatus {
    /// Percentage bounded to [0, 100] for progress bars.
    pub fn clamped_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    pub fn is_reached(&self) -> bool {
        self.saved >= self.target
    }

    pub fn remaining(&self) -> Amount {
        (self.target - self.saved).max(0)
    }
}
