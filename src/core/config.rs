//! Simulation configuration.
//!
//! Every balance constant of the level lives here so that a session can be
//! tuned (or replayed) without touching the simulation code. Defaults match
//! the shipped game balance.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Point awards and penalties applied by the level manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Points for cleaning an infected file (combo-scaled).
    pub clean_infected: i64,
    /// Penalty for cleaning a safe file.
    pub clean_safe_penalty: i64,
    /// Points for quarantining an infected file (combo-scaled).
    pub quarantine_infected: i64,
    /// Penalty for quarantining a safe file.
    pub quarantine_safe_penalty: i64,
    /// Points for scanning a file that turns out to be infected.
    pub scan_infected: i64,
    /// Victory bonus per remaining resource unit.
    pub resource_bonus_per_unit: f64,
    /// Elapsed-time victory bonus tiers.
    pub time_bonus: TimeBonus,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            clean_infected: 100,
            clean_safe_penalty: 50,
            quarantine_infected: 80,
            quarantine_safe_penalty: 30,
            scan_infected: 20,
            resource_bonus_per_unit: 5.0,
            time_bonus: TimeBonus::default(),
        }
    }
}

/// Tiered bonus for finishing the level quickly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeBonus {
    /// Finish strictly under this many seconds for `fast_points`.
    pub fast_secs: f64,
    pub fast_points: i64,
    /// Finish strictly under this many seconds for `medium_points`.
    pub medium_secs: f64,
    pub medium_points: i64,
    /// Awarded otherwise.
    pub slow_points: i64,
}

impl Default for TimeBonus {
    fn default() -> Self {
        Self {
            fast_secs: 300.0,
            fast_points: 500,
            medium_secs: 600.0,
            medium_points: 300,
            slow_points: 100,
        }
    }
}

impl TimeBonus {
    /// Bonus for a victory reached after `elapsed_secs`.
    #[must_use]
    pub fn points_for(&self, elapsed_secs: f64) -> i64 {
        if elapsed_secs < self.fast_secs {
            self.fast_points
        } else if elapsed_secs < self.medium_secs {
            self.medium_points
        } else {
            self.slow_points
        }
    }
}

/// Complete configuration for one Level-2 session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Resource pool size; the bar starts full.
    pub max_resources: f64,

    /// At or below this many resources the UI shows a warning.
    pub critical_threshold: f64,

    /// Seed for scan-risk rolls. Same seed produces identical reports.
    pub seed: u64,

    /// Score table.
    pub rewards: Rewards,

    /// Extra resources lost when a safe file is quarantined.
    pub quarantine_safe_resource_penalty: f64,

    /// Extra resources lost when a safe file is cleaned.
    pub clean_safe_resource_penalty: f64,

    /// Resources restored for a correct malware quiz answer.
    pub quiz_correct_restore: f64,

    /// Resources consumed for a wrong malware quiz answer.
    pub quiz_wrong_cost: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_resources: 100.0,
            critical_threshold: 10.0,
            seed: 42,
            rewards: Rewards::default(),
            quarantine_safe_resource_penalty: 5.0,
            clean_safe_resource_penalty: 12.0,
            quiz_correct_restore: 4.0,
            quiz_wrong_cost: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_resources.is_finite() && self.max_resources > 0.0) {
            return Err(ConfigError::InvalidMaxResources(self.max_resources));
        }
        if !(0.0..=self.max_resources).contains(&self.critical_threshold) {
            return Err(ConfigError::InvalidCriticalThreshold {
                threshold: self.critical_threshold,
                max: self.max_resources,
            });
        }
        let tiers = &self.rewards.time_bonus;
        if tiers.fast_secs > tiers.medium_secs {
            return Err(ConfigError::UnorderedTimeTiers {
                fast_secs: tiers.fast_secs,
                medium_secs: tiers.medium_secs,
            });
        }
        let non_negative = [
            ("quarantine_safe_resource_penalty", self.quarantine_safe_resource_penalty),
            ("clean_safe_resource_penalty", self.clean_safe_resource_penalty),
            ("quiz_correct_restore", self.quiz_correct_restore),
            ("quiz_wrong_cost", self.quiz_wrong_cost),
            ("resource_bonus_per_unit", self.rewards.resource_bonus_per_unit),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative(name));
            }
        }
        Ok(())
    }

    /// Set the resource pool size.
    #[must_use]
    pub fn with_max_resources(mut self, max: f64) -> Self {
        self.max_resources = max;
        self
    }

    /// Set the critical warning threshold.
    #[must_use]
    pub fn with_critical_threshold(mut self, threshold: f64) -> Self {
        self.critical_threshold = threshold;
        self
    }

    /// Set the scan RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the score table.
    #[must_use]
    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }
}
