//! The simulated machine's files and the scanner that inspects them.

mod file;
mod inventory;
mod scan;

pub use file::{FileId, FileMetadata, Infection, SystemFile};
pub use inventory::FileInventory;
pub use scan::{
    FolderScanEntry, FolderScanReport, ScanReport, Scanner, HIGH_RISK_THRESHOLD, MAX_FOLDER_ENTRIES,
};
