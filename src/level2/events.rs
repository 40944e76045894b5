//! Session log.
//!
//! The UI reads the log to drive feedback messages; it never feeds back
//! into the simulation.

use serde::{Deserialize, Serialize};

use crate::symptoms::SymptomKind;

/// A log entry stamped with simulated time (sum of `update` deltas).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub at_ms: f64,
    pub kind: SessionEventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// An action was charged and its timer handed out.
    ActionStarted { action: String, cost: f64 },
    ThreatEliminated { points: i64 },
    ThreatQuarantined { points: i64 },
    /// A safe file was cleaned or quarantined.
    FalsePositive { penalty: i64, resource_penalty: f64 },
    InfectedScanned { points: i64 },
    SymptomActivated { symptom: SymptomKind, source: Option<String> },
    SymptomResolved { symptom: SymptomKind },
    /// In-level malware question; `delta` is the resource change.
    MalwareQuizAnswered { correct: bool, delta: f64 },
    QuizCompleted { correct: u32, total: u32, bonus: i64 },
    Victory { resource_bonus: i64, time_bonus: i64 },
    Defeat,
}
