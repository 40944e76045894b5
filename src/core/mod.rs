//! Core building blocks: configuration, deterministic RNG, error types.
//!
//! Everything else in the crate is parameterized by `SimulationConfig`
//! rather than hardcoding balance constants.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{Rewards, SimulationConfig, TimeBonus};
pub use error::{ConfigError, ParseKindError, SaveError};
pub use rng::{GameRng, GameRngState};
