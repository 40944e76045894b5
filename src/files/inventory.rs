//! Directory tree of files for one level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::file::{FileId, SystemFile};
use crate::symptoms::SymptomKind;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Directory {
    subfolders: Vec<String>,
    files: Vec<FileId>,
}

/// All files on the simulated machine, grouped by directory.
///
/// Directories iterate in path order so scans and counts are reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInventory {
    files: Vec<SystemFile>,
    directories: BTreeMap<String, Directory>,
}

impl FileInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a directory and its subfolder names.
    pub fn add_directory(&mut self, path: impl Into<String>, subfolders: &[&str]) {
        let dir = self.directories.entry(path.into()).or_default();
        dir.subfolders = subfolders.iter().map(|s| (*s).to_string()).collect();
    }

    /// Place a file in a directory (created if missing).
    pub fn add_file(&mut self, directory: impl Into<String>, file: SystemFile) -> FileId {
        let id = FileId::new(self.files.len() as u32);
        self.files.push(file);
        self.directories.entry(directory.into()).or_default().files.push(id);
        id
    }

    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&SystemFile> {
        self.files.get(id.index())
    }

    pub fn get_mut(&mut self, id: FileId) -> Option<&mut SystemFile> {
        self.files.get_mut(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Every file with its handle.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SystemFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId::new(i as u32), f))
    }

    /// Directory paths in order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.keys().map(String::as_str)
    }

    /// Files directly inside `directory`.
    pub fn files_in<'a>(&'a self, directory: &str) -> impl Iterator<Item = (FileId, &'a SystemFile)> + 'a {
        self.directories
            .get(directory)
            .into_iter()
            .flat_map(|dir| dir.files.iter())
            .filter_map(move |&id| self.get(id).map(|f| (id, f)))
    }

    /// Subfolder names of `directory` (empty if unknown).
    #[must_use]
    pub fn subfolders(&self, directory: &str) -> &[String] {
        self.directories
            .get(directory)
            .map(|dir| dir.subfolders.as_slice())
            .unwrap_or(&[])
    }

    /// Number of infected files; the level's threat total.
    #[must_use]
    pub fn infected_count(&self) -> u32 {
        self.files.iter().filter(|f| f.is_infected()).count() as u32
    }

    /// Does any unresolved infected file other than `except` cause `symptom`?
    #[must_use]
    pub fn has_unresolved_infection(&self, symptom: SymptomKind, except: FileId) -> bool {
        self.iter().any(|(id, f)| {
            id != except && !f.is_resolved() && f.symptom() == Some(symptom)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symptoms::MalwareKind;

    fn inventory() -> (FileInventory, FileId, FileId, FileId) {
        let mut inv = FileInventory::new();
        inv.add_directory("C:/", &["Users", "Temp"]);
        let safe = inv.add_file(
            "C:/Temp",
            SystemFile::new("logfile.log", ".log", "3 KB", "16/03/2024 12:10", "Lectura"),
        );
        let adware = inv.add_file(
            "C:/Temp",
            SystemFile::new("adware_bundle.exe", ".exe", "650 KB", "15/03/2024 04:30", "Ejecución")
                .infected(MalwareKind::Adware, 88),
        );
        let second = inv.add_file(
            "C:/Users",
            SystemFile::new("toolbar.exe", ".exe", "120 KB", "14/03/2024 11:00", "Ejecución")
                .infected(MalwareKind::Adware, 70),
        );
        (inv, safe, adware, second)
    }

    #[test]
    fn test_counts_and_lookup() {
        let (inv, safe, adware, _) = inventory();
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.infected_count(), 2);
        assert_eq!(inv.get(safe).unwrap().name(), "logfile.log");
        assert!(inv.get(FileId::new(99)).is_none());

        let temp: Vec<_> = inv.files_in("C:/Temp").map(|(id, _)| id).collect();
        assert_eq!(temp, vec![safe, adware]);
        assert_eq!(inv.files_in("D:/").count(), 0);
    }

    #[test]
    fn test_subfolders() {
        let (inv, ..) = inventory();
        assert_eq!(inv.subfolders("C:/"), ["Users".to_string(), "Temp".to_string()]);
        assert!(inv.subfolders("C:/Temp").is_empty());
        assert_eq!(inv.directories().collect::<Vec<_>>(), vec!["C:/", "C:/Temp", "C:/Users"]);
    }

    #[test]
    fn test_shared_symptom_tracking() {
        let (mut inv, _, adware, second) = inventory();
        assert!(inv.has_unresolved_infection(SymptomKind::Popups, adware));

        inv.get_mut(second).unwrap().mark_eliminated();
        assert!(!inv.has_unresolved_infection(SymptomKind::Popups, adware));
        assert!(!inv.has_unresolved_infection(SymptomKind::Slowdown, adware));
    }
}
