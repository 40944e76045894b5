//! Fixed symptom registry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::kind::SymptomKind;

/// One symptom instance in the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    kind: SymptomKind,
    severity: u8,
    resource_drain: f64,
    active: bool,
    /// Name of the file that caused the symptom. Back-reference only.
    source_file: Option<String>,
}

impl Symptom {
    /// Inactive symptom with the registry constants for `kind`.
    #[must_use]
    pub fn new(kind: SymptomKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            resource_drain: kind.resource_drain(),
            active: false,
            source_file: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SymptomKind {
        self.kind
    }

    #[must_use]
    pub fn severity(&self) -> u8 {
        self.severity
    }

    #[must_use]
    pub fn resource_drain(&self) -> f64 {
        self.resource_drain
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// Activate, replacing the recorded source.
    pub fn activate(&mut self, source_file: Option<String>) {
        self.active = true;
        self.source_file = source_file;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.source_file = None;
    }
}

/// Registry holding exactly one `Symptom` per `SymptomKind`.
///
/// Symptoms are never added or removed; only their active flag and source
/// change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymptomManager {
    symptoms: [Symptom; 4],
}

impl Default for SymptomManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            symptoms: SymptomKind::ALL.map(Symptom::new),
        }
    }

    /// Look up a symptom.
    #[must_use]
    pub fn get(&self, kind: SymptomKind) -> &Symptom {
        &self.symptoms[kind.index()]
    }

    #[must_use]
    pub fn is_active(&self, kind: SymptomKind) -> bool {
        self.get(kind).is_active()
    }

    /// Activate a symptom. Re-activating only refreshes the source file.
    pub fn activate_symptom(&mut self, kind: SymptomKind, source_file: Option<String>) {
        debug!(symptom = %kind, source = ?source_file, "symptom activated");
        self.symptoms[kind.index()].activate(source_file);
    }

    /// Deactivate a symptom. Deactivating an inactive symptom is a no-op.
    pub fn deactivate_symptom(&mut self, kind: SymptomKind) {
        let symptom = &mut self.symptoms[kind.index()];
        if symptom.is_active() {
            debug!(symptom = %kind, "symptom deactivated");
        }
        symptom.deactivate();
    }

    /// String-keyed activation. Accepts symptom or malware names.
    ///
    /// Returns `false` (and changes nothing) for unknown names.
    pub fn activate_symptom_by_name(&mut self, name: &str, source_file: Option<String>) -> bool {
        match SymptomKind::resolve(name) {
            Some(kind) => {
                self.activate_symptom(kind, source_file);
                true
            }
            None => {
                warn!(name, "ignoring activation of unknown symptom");
                false
            }
        }
    }

    /// String-keyed deactivation. Returns `false` for unknown names.
    pub fn deactivate_symptom_by_name(&mut self, name: &str) -> bool {
        match SymptomKind::resolve(name) {
            Some(kind) => {
                self.deactivate_symptom(kind);
                true
            }
            None => {
                warn!(name, "ignoring deactivation of unknown symptom");
                false
            }
        }
    }

    /// Sum of `resource_drain` over active symptoms. Recomputed every call.
    #[must_use]
    pub fn total_drain(&self) -> f64 {
        self.symptoms
            .iter()
            .filter(|s| s.is_active())
            .map(Symptom::resource_drain)
            .sum()
    }

    /// Active symptoms in registry order.
    #[must_use]
    pub fn active_symptoms(&self) -> SmallVec<[&Symptom; 4]> {
        self.symptoms.iter().filter(|s| s.is_active()).collect()
    }

    #[must_use]
    pub fn has_active_symptoms(&self) -> bool {
        self.symptoms.iter().any(Symptom::is_active)
    }

    /// Iterate over the whole registry.
    pub fn iter(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.iter()
    }
}
