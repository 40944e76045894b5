//! Timed actions and their balance table.

mod timer;

pub use timer::{ActionKind, ActionProfile, ActionTimer, ActionTimerFactory};
