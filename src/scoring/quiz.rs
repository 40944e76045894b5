//! Post-level quiz bonus.

use serde::{Deserialize, Serialize};

/// Converts a quiz result into a one-time score bonus.
///
/// | Correct share | Bonus |
/// |---|---|
/// | ≥ 90% | 500 |
/// | ≥ 70% | 300 |
/// | ≥ 50% | 150 |
/// | otherwise | 50 |
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBonusSystem {
    quiz_completed: bool,
    correct_answers: u32,
    total_questions: u32,
    bonus_points: i64,
}

impl QuizBonusSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result and compute its bonus.
    ///
    /// `correct` is clamped to `total`. A second call overwrites the first.
    /// An empty quiz (`total == 0`) scores 0% and gets the minimum bonus.
    pub fn complete_quiz(&mut self, correct: u32, total: u32) -> i64 {
        let correct = correct.min(total);
        self.quiz_completed = true;
        self.correct_answers = correct;
        self.total_questions = total;
        self.bonus_points = Self::bonus_for(correct, total);
        self.bonus_points
    }

    /// Threshold table, compared in integer arithmetic so 50% is exactly 50%.
    #[must_use]
    pub fn bonus_for(correct: u32, total: u32) -> i64 {
        let reaches = |pct: u64| total > 0 && u64::from(correct) * 100 >= pct * u64::from(total);
        if reaches(90) {
            500
        } else if reaches(70) {
            300
        } else if reaches(50) {
            150
        } else {
            50
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.quiz_completed
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn bonus_points(&self) -> i64 {
        self.bonus_points
    }

    /// Correct share in percent (0 before completion or for an empty quiz).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            100.0 * f64::from(self.correct_answers) / f64::from(self.total_questions)
        }
    }
}
