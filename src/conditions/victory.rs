//! Victory: every known threat eliminated or quarantined.

use serde::{Deserialize, Serialize};

/// Counts handled threats against the level's total.
///
/// Counters only grow. Callers register each file once; the file-aware
/// path in the level manager guarantees that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryConditionChecker {
    total_threats: u32,
    threats_eliminated: u32,
    threats_quarantined: u32,
}

impl VictoryConditionChecker {
    #[must_use]
    pub fn new(total_threats: u32) -> Self {
        Self {
            total_threats,
            ..Self::default()
        }
    }

    pub fn register_elimination(&mut self) {
        self.threats_eliminated += 1;
    }

    pub fn register_quarantine(&mut self) {
        self.threats_quarantined += 1;
    }

    #[must_use]
    pub fn total_threats(&self) -> u32 {
        self.total_threats
    }

    #[must_use]
    pub fn threats_eliminated(&self) -> u32 {
        self.threats_eliminated
    }

    #[must_use]
    pub fn threats_quarantined(&self) -> u32 {
        self.threats_quarantined
    }

    /// Eliminated plus quarantined.
    #[must_use]
    pub fn threats_handled(&self) -> u32 {
        self.threats_eliminated + self.threats_quarantined
    }

    /// Handled share of the total in percent, capped at 100.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        if self.total_threats == 0 {
            return 0.0;
        }
        (100.0 * f64::from(self.threats_handled()) / f64::from(self.total_threats)).min(100.0)
    }

    /// A level with no threats is never won.
    #[must_use]
    pub fn check_victory(&self) -> bool {
        self.total_threats > 0 && self.threats_handled() >= self.total_threats
    }
}
