//! Resumable session snapshots.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::events::SessionEvent;
use super::manager::GameStatus;
use crate::conditions::VictoryConditionChecker;
use crate::core::{GameRngState, SaveError, SimulationConfig};
use crate::files::FileInventory;
use crate::resources::ResourceBar;
use crate::scoring::{QuizBonusSystem, ScoreManager};
use crate::symptoms::SymptomManager;

/// Everything `Level2GameManager::restore` needs, minus the clock.
///
/// The scan streams resume mid-sequence, so a restored session produces the
/// same reports the original would have.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    pub(super) config: SimulationConfig,
    pub(super) resources: ResourceBar,
    pub(super) symptoms: SymptomManager,
    pub(super) victory: VictoryConditionChecker,
    pub(super) quiz_bonus: QuizBonusSystem,
    pub(super) score: ScoreManager,
    pub(super) game_state: GameStatus,
    pub(super) sim_time_ms: f64,
    pub(super) files: FileInventory,
    pub(super) scanner: (GameRngState, GameRngState),
    pub(super) mistakes: u32,
    pub(super) events: Vector<SessionEvent>,
    pub(super) next_ticket: u64,
    pub(super) pending: Vec<u64>,
}

impl SessionCheckpoint {
    #[must_use]
    pub fn game_state(&self) -> GameStatus {
        self.game_state
    }

    /// Simulated milliseconds played when the checkpoint was taken.
    #[must_use]
    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
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
