//! The session's resource pool.

mod bar;

pub use bar::{ResourceBar, SharedResourceBar};
