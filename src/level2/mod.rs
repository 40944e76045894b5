//! Level 2: malware triage session.
//!
//! The player spends a depleting resource pool on timed actions against
//! the machine's files while active symptoms drain the pool in the
//! background. The session ends in victory when every threat is handled,
//! or in defeat when the pool runs dry.

mod checkpoint;
mod clock;
mod events;
mod manager;

pub use checkpoint::SessionCheckpoint;
pub use clock::{Clock, ManualClock, WallClock};
pub use events::{SessionEvent, SessionEventKind};
pub use manager::{
    ActionOutcome, ActionTarget, GameStats, GameStatus, Level2Builder, Level2GameManager, LEVEL_NUMBER,
};
