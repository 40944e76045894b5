//! Scoring: points with combos, quiz bonuses, per-level records.

mod board;
mod quiz;
mod score;

pub use board::Scoreboard;
pub use quiz::QuizBonusSystem;
pub use score::{Rank, ScoreManager};
