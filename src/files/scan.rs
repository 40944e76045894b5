//! Scan reports.
//!
//! Infected files always report their infection probability. Clean files
//! and folders report low random noise so a scan alone never looks like a
//! perfect oracle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::file::SystemFile;
use super::inventory::FileInventory;
use crate::core::{GameRng, GameRngState};
use crate::symptoms::MalwareKind;

/// Noise ceiling for a clean file scanned on its own.
const CLEAN_FILE_MAX_RISK: u8 = 15;
/// Noise ceiling for a clean file inside a folder scan.
const FOLDER_FILE_MAX_RISK: u8 = 20;
/// Noise ceiling for a subfolder inside a folder scan.
const SUBFOLDER_MAX_RISK: u8 = 30;
/// Entries listed per folder scan.
pub const MAX_FOLDER_ENTRIES: usize = 6;
/// Risk above this is reported as high.
pub const HIGH_RISK_THRESHOLD: u8 = 50;

/// Result of scanning one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub file_name: String,
    /// Reported risk, 0-100.
    pub risk: u8,
    /// Malware identified, if any.
    pub detected: Option<MalwareKind>,
}

impl ScanReport {
    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.risk > HIGH_RISK_THRESHOLD
    }
}

/// One line of a folder scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderScanEntry {
    pub name: String,
    pub is_folder: bool,
    pub risk: u8,
}

impl FolderScanEntry {
    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.risk > HIGH_RISK_THRESHOLD
    }
}

/// Result of scanning a directory: subfolders first, then unresolved files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderScanReport {
    pub directory: String,
    pub entries: SmallVec<[FolderScanEntry; MAX_FOLDER_ENTRIES]>,
}

/// Deterministic scanner with separate streams for files and folders.
#[derive(Clone, Debug)]
pub struct Scanner {
    file_rng: GameRng,
    folder_rng: GameRng,
}

impl Scanner {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let root = GameRng::new(seed);
        Self {
            file_rng: root.for_context("scan_file"),
            folder_rng: root.for_context("scan_folder"),
        }
    }

    /// Scan a single file.
    pub fn scan_file(&mut self, file: &SystemFile) -> ScanReport {
        let (risk, detected) = match file.infection() {
            Some(infection) => (infection.probability, Some(infection.malware)),
            None => (self.file_rng.roll_percent(CLEAN_FILE_MAX_RISK), None),
        };
        ScanReport {
            file_name: file.name().to_string(),
            risk,
            detected,
        }
    }

    /// Scan a directory, listing at most `MAX_FOLDER_ENTRIES` entries.
    ///
    /// Quarantined and eliminated files are skipped.
    pub fn scan_folder(&mut self, inventory: &FileInventory, directory: &str) -> FolderScanReport {
        let mut entries: SmallVec<[FolderScanEntry; MAX_FOLDER_ENTRIES]> = SmallVec::new();

        for subfolder in inventory.subfolders(directory) {
            if entries.len() == MAX_FOLDER_ENTRIES {
                break;
            }
            entries.push(FolderScanEntry {
                name: subfolder.clone(),
                is_folder: true,
                risk: self.folder_rng.roll_percent(SUBFOLDER_MAX_RISK),
            });
        }

        for (_, file) in inventory.files_in(directory).filter(|(_, f)| !f.is_resolved()) {
            if entries.len() == MAX_FOLDER_ENTRIES {
                break;
            }
            let risk = match file.infection() {
                Some(infection) => infection.probability,
                None => self.folder_rng.roll_percent(FOLDER_FILE_MAX_RISK),
            };
            entries.push(FolderScanEntry {
                name: file.name().to_string(),
                is_folder: false,
                risk,
            });
        }

        FolderScanReport {
            directory: directory.to_string(),
            entries,
        }
    }

    /// Checkpoint both streams.
    #[must_use]
    pub fn state(&self) -> (GameRngState, GameRngState) {
        (self.file_rng.state(), self.folder_rng.state())
    }

    /// Resume from a checkpoint.
    #[must_use]
    pub fn from_state(files: &GameRngState, folders: &GameRngState) -> Self {
        Self {
            file_rng: GameRng::from_state(files),
            folder_rng: GameRng::from_state(folders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(name: &str) -> SystemFile {
        SystemFile::new(name, ".log", "3 KB", "16/03/2024 12:10", "Lectura")
    }

    #[test]
    fn test_infected_file_reports_probability() {
        let mut scanner = Scanner::new(1);
        let file = SystemFile::new("svchost32.exe", ".exe", "90 KB", "13/03/2024 03:15", "Sistema")
            .infected(MalwareKind::Miner, 92);
        let report = scanner.scan_file(&file);
        assert_eq!(report.risk, 92);
        assert_eq!(report.detected, Some(MalwareKind::Miner));
        assert!(report.is_high_risk());
    }

    #[test]
    fn test_clean_file_noise_is_low() {
        let mut scanner = Scanner::new(7);
        for _ in 0..50 {
            let report = scanner.scan_file(&clean("notes.log"));
            assert!(report.risk <= 15);
            assert_eq!(report.detected, None);
        }
    }

    #[test]
    fn test_same_seed_same_reports() {
        let mut a = Scanner::new(11);
        let mut b = Scanner::new(11);
        for _ in 0..10 {
            assert_eq!(a.scan_file(&clean("x.log")), b.scan_file(&clean("x.log")));
        }
    }

    #[test]
    fn test_folder_scan_order_and_cap() {
        let mut inv = FileInventory::new();
        inv.add_directory("C:/Temp", &["Cache", "Old"]);
        for i in 0..6 {
            inv.add_file("C:/Temp", clean(&format!("tmp{i}.log")));
        }

        let mut scanner = Scanner::new(3);
        let report = scanner.scan_folder(&inv, "C:/Temp");

        assert_eq!(report.entries.len(), MAX_FOLDER_ENTRIES);
        assert!(report.entries[0].is_folder);
        assert!(report.entries[1].is_folder);
        assert!(!report.entries[2].is_folder);
        assert!(report.entries[..2].iter().all(|e| e.risk <= 30));
        assert!(report.entries[2..].iter().all(|e| e.risk <= 20 && !e.is_high_risk()));
    }

    #[test]
    fn test_folder_scan_skips_resolved() {
        let mut inv = FileInventory::new();
        let gone = inv.add_file("C:/", clean("gone.log"));
        inv.add_file(
            "C:/",
            clean("payload.exe").infected(MalwareKind::Ransomware, 95),
        );
        inv.get_mut(gone).unwrap().mark_eliminated();

        let report = Scanner::new(5).scan_folder(&inv, "C:/");
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].name, "payload.exe");
        assert!(report.entries[0].is_high_risk());
    }

    #[test]
    fn test_checkpoint_resume() {
        let mut scanner = Scanner::new(9);
        scanner.scan_file(&clean("a.log"));
        let (files, folders) = scanner.state();

        let expected = scanner.scan_file(&clean("b.log"));
        let mut resumed = Scanner::from_state(&files, &folders);
        assert_eq!(resumed.scan_file(&clean("b.log")), expected);
    }
}
