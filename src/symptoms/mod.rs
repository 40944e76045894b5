//! Symptoms: persistent effects of unresolved infections.
//!
//! Each active symptom drains resources every second until the infected
//! file behind it is cleaned or quarantined.

mod kind;
mod manager;

pub use kind::{MalwareKind, SymptomKind};
pub use manager::{Symptom, SymptomManager};
