//! Error types for the crate's fallible edges.
//!
//! The simulation itself is total: resource operations clamp, unknown
//! symptom names return `false`, unknown action names get a default timer.
//! Errors only surface where outside data enters the crate: configuration,
//! name parsing and save files.

use thiserror::Error;

/// Invalid or malformed simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_resources must be positive and finite, got {0}")]
    InvalidMaxResources(f64),

    #[error("critical_threshold {threshold} must be within [0, {max}]")]
    InvalidCriticalThreshold { threshold: f64, max: f64 },

    #[error("time bonus tiers must be ascending, got {fast_secs}s then {medium_secs}s")]
    UnorderedTimeTiers { fast_secs: f64, medium_secs: f64 },

    #[error("negative value for {0}")]
    Negative(&'static str),

    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A name that does not belong to a closed enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct ParseKindError {
    /// Which enumeration was being parsed ("action", "symptom", "malware").
    pub kind: &'static str,
    /// The rejected input.
    pub name: String,
}

impl ParseKindError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Save file encode/decode failure (scoreboards, session checkpoints).
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("save data corrupted: {0}")]
    Corrupted(#[source] bincode::Error),
}
