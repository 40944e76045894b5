//! Per-level best scores across play sessions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::score::{Rank, ScoreManager};
use crate::core::SaveError;

/// One `ScoreManager` per level, with the level currently being played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    levels: FxHashMap<u8, ScoreManager>,
    current_level: u8,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(Self::LEVEL_COUNT)
    }
}

impl Scoreboard {
    /// Levels shipped with the game.
    pub const LEVEL_COUNT: u8 = 3;

    /// Board for levels `1..=level_count`, starting on level 1.
    #[must_use]
    pub fn new(level_count: u8) -> Self {
        let levels = (1..=level_count.max(1))
            .map(|level| (level, ScoreManager::new(level)))
            .collect();
        Self {
            levels,
            current_level: 1,
        }
    }

    #[must_use]
    pub fn current_level(&self) -> u8 {
        self.current_level
    }

    /// Switch level and reset its current score. Unknown levels are ignored.
    pub fn set_current_level(&mut self, level: u8) -> bool {
        match self.levels.get_mut(&level) {
            Some(score) => {
                score.reset_current_score();
                self.current_level = level;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn level(&self, level: u8) -> Option<&ScoreManager> {
        self.levels.get(&level)
    }

    /// Score manager for the level being played.
    pub fn current_mut(&mut self) -> Option<&mut ScoreManager> {
        self.levels.get_mut(&self.current_level)
    }

    /// Fold a finished session into its level's record.
    ///
    /// Keeps the higher best score; the session's current score becomes the
    /// level's current score.
    pub fn record_session(&mut self, session: &ScoreManager) -> bool {
        match self.levels.get_mut(&session.level_number()) {
            Some(entry) => {
                let best = entry.best_score();
                *entry = session.clone();
                entry.merge_best(best);
                true
            }
            None => false,
        }
    }

    /// Best score for a level (0 for unknown levels).
    #[must_use]
    pub fn best_score(&self, level: u8) -> i64 {
        self.levels.get(&level).map_or(0, ScoreManager::best_score)
    }

    /// Rank of a level's best score (D for unknown levels).
    #[must_use]
    pub fn rank_for_level(&self, level: u8) -> Rank {
        Rank::for_score(self.best_score(level))
    }

    /// Encode for a save file.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        bincode::serialize(self).map_err(SaveError::Encode)
    }

    /// Decode a save file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        bincode::deserialize(bytes).map_err(SaveError::Corrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let board = Scoreboard::default();
        assert_eq!(board.current_level(), 1);
        for level in 1..=3 {
            assert!(board.level(level).is_some());
            assert_eq!(board.rank_for_level(level), Rank::D);
        }
        assert!(board.level(4).is_none());
        assert_eq!(board.best_score(9), 0);
    }

    #[test]
    fn test_set_current_level_resets_score() {
        let mut board = Scoreboard::default();
        assert!(board.set_current_level(2));
        board.current_mut().unwrap().add_points(800, false);

        assert!(board.set_current_level(2));
        let level = board.level(2).unwrap();
        assert_eq!(level.current_score(), 0);
        assert_eq!(level.best_score(), 800);

        assert!(!board.set_current_level(7));
        assert_eq!(board.current_level(), 2);
    }

    #[test]
    fn test_record_session_keeps_best() {
        let mut board = Scoreboard::default();

        let mut strong = ScoreManager::new(2);
        strong.add_points(3200, false);
        assert!(board.record_session(&strong));

        let mut weak = ScoreManager::new(2);
        weak.add_points(600, false);
        board.record_session(&weak);

        assert_eq!(board.best_score(2), 3200);
        assert_eq!(board.level(2).unwrap().current_score(), 600);
        assert_eq!(board.rank_for_level(2), Rank::A);

        assert!(!board.record_session(&ScoreManager::new(9)));
    }

    #[test]
    fn test_save_round_trip() {
        let mut board = Scoreboard::default();
        let mut session = ScoreManager::new(1);
        session.add_points(1500, false);
        board.record_session(&session);

        let bytes = board.to_bytes().unwrap();
        let restored = Scoreboard::from_bytes(&bytes).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_corrupted_save() {
        let err = Scoreboard::from_bytes(&[0xFF, 0x01]).unwrap_err();
        assert!(matches!(err, SaveError::Corrupted(_)));
    }
}
