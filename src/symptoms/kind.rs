//! Symptom and malware enumerations.
//!
//! Both sets are closed. Their wire names are the identifiers the game UI
//! passes around, so `FromStr`/`name()` must stay stable.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::ParseKindError;

/// A visible effect of an unresolved infection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymptomKind {
    /// The machine crawls (`ralentizacion`).
    Slowdown,
    /// Unwanted windows keep appearing (`popups`).
    Popups,
    /// The screen is locked behind a ransom note (`pantalla_bloqueada`).
    LockedScreen,
    /// Keys press themselves (`teclas_fantasma`).
    GhostKeys,
}

impl SymptomKind {
    /// Every symptom, in registry order.
    pub const ALL: [SymptomKind; 4] = [
        SymptomKind::Slowdown,
        SymptomKind::Popups,
        SymptomKind::LockedScreen,
        SymptomKind::GhostKeys,
    ];

    /// Wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SymptomKind::Slowdown => "ralentizacion",
            SymptomKind::Popups => "popups",
            SymptomKind::LockedScreen => "pantalla_bloqueada",
            SymptomKind::GhostKeys => "teclas_fantasma",
        }
    }

    /// Descriptive severity, 1-10. Not used in any calculation.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            SymptomKind::Slowdown => 6,
            SymptomKind::Popups => 4,
            SymptomKind::LockedScreen => 9,
            SymptomKind::GhostKeys => 5,
        }
    }

    /// Resource units drained per second while active.
    #[must_use]
    pub const fn resource_drain(self) -> f64 {
        match self {
            SymptomKind::Slowdown => 2.0,
            SymptomKind::Popups => 1.5,
            SymptomKind::LockedScreen => 2.5,
            SymptomKind::GhostKeys => 1.0,
        }
    }

    /// Malware family that causes this symptom.
    #[must_use]
    pub const fn malware(self) -> MalwareKind {
        match self {
            SymptomKind::Slowdown => MalwareKind::Miner,
            SymptomKind::Popups => MalwareKind::Adware,
            SymptomKind::LockedScreen => MalwareKind::Ransomware,
            SymptomKind::GhostKeys => MalwareKind::Spyware,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a symptom name or a malware name to its symptom.
    ///
    /// Callers historically pass either, so both are accepted.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        name.parse::<SymptomKind>()
            .ok()
            .or_else(|| name.parse::<MalwareKind>().ok().map(MalwareKind::symptom))
    }
}

impl FromStr for SymptomKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymptomKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError::new("symptom", s))
    }
}

impl std::fmt::Display for SymptomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Malware families found in the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MalwareKind {
    Ransomware,
    Adware,
    Miner,
    Spyware,
}

impl MalwareKind {
    pub const ALL: [MalwareKind; 4] = [
        MalwareKind::Ransomware,
        MalwareKind::Adware,
        MalwareKind::Miner,
        MalwareKind::Spyware,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MalwareKind::Ransomware => "ransomware",
            MalwareKind::Adware => "adware",
            MalwareKind::Miner => "miner",
            MalwareKind::Spyware => "spyware",
        }
    }

    /// The symptom this family produces while unresolved.
    #[must_use]
    pub const fn symptom(self) -> SymptomKind {
        match self {
            MalwareKind::Ransomware => SymptomKind::LockedScreen,
            MalwareKind::Adware => SymptomKind::Popups,
            MalwareKind::Miner => SymptomKind::Slowdown,
            MalwareKind::Spyware => SymptomKind::GhostKeys,
        }
    }

    /// Nominal damage rating shown in file details.
    #[must_use]
    pub const fn damage(self) -> u8 {
        match self {
            MalwareKind::Ransomware => 25,
            MalwareKind::Adware => 15,
            MalwareKind::Miner => 20,
            MalwareKind::Spyware => 10,
        }
    }
}

impl FromStr for MalwareKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MalwareKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError::new("malware", s))
    }
}

impl std::fmt::Display for MalwareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
