//! Combo-aware score accumulator.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Letter rank for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Rank thresholds: S ≥ 5000, A ≥ 3000, B ≥ 1500, C ≥ 500.
    #[must_use]
    pub fn for_score(score: i64) -> Self {
        match score {
            s if s >= 5000 => Rank::S,
            s if s >= 3000 => Rank::A,
            s if s >= 1500 => Rank::B,
            s if s >= 500 => Rank::C,
            _ => Rank::D,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
        };
        f.write_str(letter)
    }
}

/// Score for one level.
///
/// Every award extends the combo; a penalty breaks it. Combo-scaled awards
/// gain 10% per combo step, capped at +200%.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreManager {
    level_number: u8,
    current_score: i64,
    best_score: i64,
    combo: u32,
    score_multiplier: f64,
}

impl ScoreManager {
    /// Maximum combo bonus as a fraction of the base award.
    pub const MAX_COMBO_BONUS: f64 = 2.0;

    #[must_use]
    pub fn new(level_number: u8) -> Self {
        Self {
            level_number,
            current_score: 0,
            best_score: 0,
            combo: 0,
            score_multiplier: 1.0,
        }
    }

    #[must_use]
    pub fn level_number(&self) -> u8 {
        self.level_number
    }

    #[must_use]
    pub fn current_score(&self) -> i64 {
        self.current_score
    }

    #[must_use]
    pub fn best_score(&self) -> i64 {
        self.best_score
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn score_multiplier(&self) -> f64 {
        self.score_multiplier
    }

    /// Set the global multiplier applied to every award.
    pub fn set_score_multiplier(&mut self, multiplier: f64) {
        self.score_multiplier = multiplier.max(0.0);
    }

    /// Award points. Returns the points actually added.
    pub fn add_points(&mut self, points: i64, with_combo: bool) -> i64 {
        let mut scaled = points;
        if with_combo && self.combo > 0 {
            let bonus = (f64::from(self.combo) * 0.1).min(Self::MAX_COMBO_BONUS);
            scaled = (scaled as f64 * (1.0 + bonus)) as i64;
        }
        let awarded = (scaled as f64 * self.score_multiplier) as i64;

        self.current_score += awarded;
        self.combo += 1;
        self.best_score = self.best_score.max(self.current_score);

        debug!(base = points, awarded, combo = self.combo, "points awarded");
        awarded
    }

    /// Deduct a penalty (score floors at 0) and break the combo.
    pub fn subtract_points(&mut self, penalty: i64) {
        self.current_score = (self.current_score - penalty.max(0)).max(0);
        self.combo = 0;
        debug!(penalty, score = self.current_score, "points deducted");
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    /// Rank of the current score.
    #[must_use]
    pub fn rank(&self) -> Rank {
        Rank::for_score(self.current_score)
    }

    /// Start a new attempt, keeping the best score.
    pub fn reset_current_score(&mut self) {
        self.current_score = 0;
        self.combo = 0;
    }

    /// Fold another attempt's best into this one.
    pub(crate) fn merge_best(&mut self, best: i64) {
        self.best_score = self.best_score.max(best);
    }
}
