//! # netdefenders-sim
//!
//! Simulation core of the NetDefenders malware triage level.
//!
//! ## Design Principles
//!
//! 1. **Total Operations**: Resource changes clamp, unknown names are
//!    rejected with `false` or a fallback. Nothing in the simulation
//!    panics or errors; defeat is a normal game outcome.
//!
//! 2. **Single Source of Truth**: `Level2GameManager` owns the session.
//!    The UI reads `GameStats` snapshots and never mirrors state.
//!
//! 3. **Closed Vocabularies**: Actions, symptoms and malware are enums.
//!    Wire names are accepted at the edges via `FromStr`.
//!
//! ## Modules
//!
//! - `core`: Configuration, deterministic RNG, error types
//! - `resources`: The bounded resource pool and its shared handle
//! - `symptoms`: Symptom registry and malware families
//! - `actions`: Timed actions and their balance table
//! - `conditions`: Victory and defeat predicates
//! - `scoring`: Combo scoring, quiz bonus, per-level records
//! - `files`: Simulated files, inventory and scanner
//! - `level2`: Session orchestration

pub mod core;
pub mod resources;
pub mod symptoms;
pub mod actions;
pub mod conditions;
pub mod scoring;
pub mod files;
pub mod level2;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameRng, GameRngState, ParseKindError, Rewards, SaveError, SimulationConfig, TimeBonus,
};

pub use crate::resources::{ResourceBar, SharedResourceBar};

pub use crate::symptoms::{MalwareKind, Symptom, SymptomKind, SymptomManager};

pub use crate::actions::{ActionKind, ActionProfile, ActionTimer, ActionTimerFactory};

pub use crate::conditions::{DefeatConditionChecker, VictoryConditionChecker};

pub use crate::scoring::{QuizBonusSystem, Rank, ScoreManager, Scoreboard};

pub use crate::files::{
    FileId, FileInventory, FileMetadata, FolderScanEntry, FolderScanReport, Infection, ScanReport,
    Scanner, SystemFile,
};

pub use crate::level2::{
    ActionOutcome, ActionTarget, Clock, GameStats, GameStatus, Level2Builder, Level2GameManager,
    ManualClock, SessionCheckpoint, SessionEvent, SessionEventKind, WallClock,
};
