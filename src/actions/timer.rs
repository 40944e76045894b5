//! Timed player actions.
//!
//! An action costs resources up front and then takes a fixed amount of
//! frame time to complete. The caller keeps at most one timer in flight
//! and polls it with `update(dt)` every frame.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::core::ParseKindError;

/// The actions a player can take on files and folders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Read a file's metadata (`inspeccionar`).
    Inspect,
    /// Scan one file for malware (`escanear_archivo`).
    ScanFile,
    /// Scan the current folder (`escanear_carpeta`).
    ScanFolder,
    /// Isolate a file (`cuarentena`).
    Quarantine,
    /// Clean a file believed to be infected (`limpiar_malware`).
    CleanMalware,
    /// Delete a file believed to be safe (`limpiar_seguro`).
    CleanSafe,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Inspect,
        ActionKind::ScanFile,
        ActionKind::ScanFolder,
        ActionKind::Quarantine,
        ActionKind::CleanMalware,
        ActionKind::CleanSafe,
    ];

    /// Wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Inspect => "inspeccionar",
            ActionKind::ScanFile => "escanear_archivo",
            ActionKind::ScanFolder => "escanear_carpeta",
            ActionKind::Quarantine => "cuarentena",
            ActionKind::CleanMalware => "limpiar_malware",
            ActionKind::CleanSafe => "limpiar_seguro",
        }
    }

    /// Does this action target a single file?
    #[must_use]
    pub const fn targets_file(self) -> bool {
        !matches!(self, ActionKind::ScanFolder)
    }

    /// Balanced `(duration_ms, cost)` pair.
    #[must_use]
    pub const fn profile(self) -> ActionProfile {
        match self {
            ActionKind::Inspect => ActionProfile::new(500.0, 0.0),
            ActionKind::ScanFile => ActionProfile::new(3000.0, 10.0),
            ActionKind::ScanFolder => ActionProfile::new(5000.0, 15.0),
            ActionKind::Quarantine => ActionProfile::new(2000.0, 8.0),
            ActionKind::CleanMalware => ActionProfile::new(4000.0, 0.0),
            ActionKind::CleanSafe => ActionProfile::new(1500.0, 12.0),
        }
    }
}

impl FromStr for ActionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError::new("action", s))
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Duration and resource cost of an action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionProfile {
    /// Milliseconds of frame time.
    pub duration: f64,
    /// Resource units charged when the action starts.
    pub cost: f64,
}

impl ActionProfile {
    /// Profile for action names outside the known set.
    pub const FALLBACK: ActionProfile = ActionProfile::new(1000.0, 5.0);

    #[must_use]
    pub const fn new(duration: f64, cost: f64) -> Self {
        Self { duration, cost }
    }
}

/// Countdown for one action invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionTimer {
    action_name: String,
    /// `None` when created from an unrecognized name.
    kind: Option<ActionKind>,
    duration: f64,
    cost: f64,
    elapsed: f64,
    in_progress: bool,
    completed: bool,
    /// Set when a session charged for this timer.
    ticket: Option<u64>,
}

impl ActionTimer {
    /// Idle timer; call `start` to begin counting.
    #[must_use]
    pub fn new(action_name: impl Into<String>, profile: ActionProfile) -> Self {
        Self {
            action_name: action_name.into(),
            kind: None,
            duration: profile.duration,
            cost: profile.cost,
            elapsed: 0.0,
            in_progress: false,
            completed: false,
            ticket: None,
        }
    }

    #[must_use]
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Session ticket, if the timer was handed out by `execute_action`.
    #[must_use]
    pub fn ticket(&self) -> Option<u64> {
        self.ticket
    }

    pub(crate) fn issue(&mut self, ticket: u64) {
        self.ticket = Some(ticket);
    }

    #[must_use]
    pub fn kind(&self) -> Option<ActionKind> {
        self.kind
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Reset and begin counting.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.in_progress = true;
        self.completed = false;
    }

    /// Advance by `dt` milliseconds.
    ///
    /// Returns `true` only on the tick the action finishes.
    pub fn update(&mut self, dt: f64) -> bool {
        if !self.in_progress {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.in_progress = false;
            self.completed = true;
            true
        } else {
            false
        }
    }

    /// Fraction complete in `[0, 1]`, for progress bars.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return if self.completed { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// Builds timers from the constant action table.
pub struct ActionTimerFactory;

impl ActionTimerFactory {
    /// Fresh, started timer for a known action.
    #[must_use]
    pub fn create(kind: ActionKind) -> ActionTimer {
        let mut timer = ActionTimer::new(kind.name(), kind.profile());
        timer.kind = Some(kind);
        timer.start();
        timer
    }

    /// Fresh, started timer for a wire name.
    ///
    /// Unknown names get `ActionProfile::FALLBACK` instead of an error.
    #[must_use]
    pub fn create_by_name(action_name: &str) -> ActionTimer {
        match action_name.parse::<ActionKind>() {
            Ok(kind) => Self::create(kind),
            Err(_) => {
                warn!(action_name, "unknown action, using fallback timing");
                let mut timer = ActionTimer::new(action_name, ActionProfile::FALLBACK);
                timer.start();
                timer
            }
        }
    }
}
