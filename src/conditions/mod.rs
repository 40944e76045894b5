//! Win and loss predicates evaluated by the level manager every tick.

mod defeat;
mod victory;

pub use defeat::DefeatConditionChecker;
pub use victory::VictoryConditionChecker;
