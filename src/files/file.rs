//! Files the player inspects, scans, quarantines and cleans.

use serde::{Deserialize, Serialize};

use crate::symptoms::{MalwareKind, SymptomKind};

/// Handle to a file in a `FileInventory`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "File({})", self.0)
    }
}

/// What a file is infected with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infection {
    pub malware: MalwareKind,
    /// Detection confidence reported by scans, 0-100.
    pub probability: u8,
}

/// A file on the simulated machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFile {
    name: String,
    extension: String,
    real_extension: String,
    size: String,
    modified: String,
    permissions: String,
    infection: Option<Infection>,
    quarantined: bool,
    eliminated: bool,
}

impl SystemFile {
    /// Clean file. `extension` is what the file claims to be; the real
    /// extension is derived from the last dotted segment of `name`.
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        size: impl Into<String>,
        modified: impl Into<String>,
        permissions: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let extension = extension.into();
        let real_extension = real_extension(&name, &extension);
        Self {
            name,
            extension,
            real_extension,
            size: size.into(),
            modified: modified.into(),
            permissions: permissions.into(),
            infection: None,
            quarantined: false,
            eliminated: false,
        }
    }

    /// Mark as infected.
    #[must_use]
    pub fn infected(mut self, malware: MalwareKind, probability: u8) -> Self {
        self.infection = Some(Infection {
            malware,
            probability: probability.min(100),
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn real_extension(&self) -> &str {
        &self.real_extension
    }

    #[must_use]
    pub fn infection(&self) -> Option<Infection> {
        self.infection
    }

    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infection.is_some()
    }

    /// Symptom this file causes while unresolved.
    #[must_use]
    pub fn symptom(&self) -> Option<SymptomKind> {
        self.infection.map(|i| i.malware.symptom())
    }

    #[must_use]
    pub fn is_quarantined(&self) -> bool {
        self.quarantined
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Already quarantined or eliminated.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.quarantined || self.eliminated
    }

    pub(crate) fn mark_quarantined(&mut self) {
        self.quarantined = true;
    }

    pub(crate) fn mark_eliminated(&mut self) {
        self.eliminated = true;
    }

    /// Heuristic red flags a careful player should notice.
    #[must_use]
    pub fn is_suspicious(&self) -> bool {
        if self.extension != self.real_extension {
            return true;
        }
        if matches!(self.extension.as_str(), ".txt" | ".ini") && self.size.contains("MB") {
            return true;
        }
        if self.extension == ".exe" && !self.size.contains("KB") {
            return true;
        }
        self.modified.contains("04:30") || self.modified.contains("03:15")
    }

    /// Snapshot for the inspection panel.
    #[must_use]
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            extension: self.extension.clone(),
            real_extension: self.real_extension.clone(),
            size: self.size.clone(),
            modified: self.modified.clone(),
            permissions: self.permissions.clone(),
            infection: self.infection,
            suspicious: self.is_suspicious(),
        }
    }
}

fn real_extension(name: &str, visible: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => format!(".{ext}"),
        None => visible.to_string(),
    }
}

/// What inspecting a file reveals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub extension: String,
    pub real_extension: String,
    pub size: String,
    pub modified: String,
    pub permissions: String,
    pub infection: Option<Infection>,
    pub suspicious: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, ext: &str, size: &str, modified: &str) -> SystemFile {
        SystemFile::new(name, ext, size, modified, "Lectura")
    }

    #[test]
    fn test_real_extension() {
        assert_eq!(file("factura.pdf.exe", ".pdf", "1 KB", "").real_extension(), ".exe");
        assert_eq!(file("notes.txt", ".txt", "1 KB", "").real_extension(), ".txt");
        assert_eq!(file("README", ".md", "1 KB", "").real_extension(), ".md");
    }

    #[test]
    fn test_suspicious_heuristics() {
        assert!(file("factura.pdf.exe", ".pdf", "80 KB", "10/03/2024 10:00").is_suspicious());
        assert!(file("config.ini", ".ini", "3 MB", "10/03/2024 10:00").is_suspicious());
        assert!(file("setup.exe", ".exe", "5.2 MB", "10/03/2024 10:00").is_suspicious());
        assert!(file("cache.tmp", ".tmp", "2 KB", "15/03/2024 04:30").is_suspicious());
        assert!(!file("notes.txt", ".txt", "4 KB", "12/03/2024 09:00").is_suspicious());
        assert!(!file("tool.exe", ".exe", "650 KB", "12/03/2024 09:00").is_suspicious());
    }

    #[test]
    fn test_infection_and_flags() {
        let mut f = file("adware_bundle.exe", ".exe", "650 KB", "15/03/2024 04:30")
            .infected(MalwareKind::Adware, 88);
        assert!(f.is_infected());
        assert_eq!(f.symptom(), Some(SymptomKind::Popups));
        assert!(!f.is_resolved());

        f.mark_quarantined();
        assert!(f.is_quarantined());
        assert!(f.is_resolved());
    }

    #[test]
    fn test_metadata_snapshot() {
        let f = file("miner.dll", ".dll", "2 MB", "13/03/2024 03:15").infected(MalwareKind::Miner, 150);
        let meta = f.metadata();
        assert_eq!(meta.name, "miner.dll");
        assert_eq!(meta.infection.unwrap().probability, 100);
        assert!(meta.suspicious);
    }
}
