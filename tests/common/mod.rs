//! Shared fixtures for integration tests.

#![allow(dead_code)]

use netdefenders_sim::{FileId, FileInventory, MalwareKind, SystemFile};

/// Handles into `sample_inventory`.
pub struct SampleFiles {
    pub inventory: FileInventory,
    pub readme: FileId,
    pub free_game: FileId,
    pub crypto_miner: FileId,
    pub x_virus: FileId,
    pub spy_tool: FileId,
    pub adware_bundle: FileId,
    pub kernel32: FileId,
}

/// A small machine with five infected files. Two of them are adware, so
/// the popups symptom has two sources.
pub fn sample_inventory() -> SampleFiles {
    let mut inv = FileInventory::new();
    inv.add_directory("C:/", &["Users", "Windows", "Temp"]);
    inv.add_directory("C:/Users/Admin", &["Documents", "Downloads"]);

    let readme = inv.add_file(
        "C:/",
        SystemFile::new("readme.txt", ".txt", "5 KB", "15/03/2024 10:30", "Lectura"),
    );
    let free_game = inv.add_file(
        "C:/Users/Admin/Downloads",
        SystemFile::new("Free_Game.exe", ".exe", "420 KB", "15/03/2024 04:30", "Ejecución")
            .infected(MalwareKind::Adware, 85),
    );
    inv.add_file(
        "C:/Users/Admin/Downloads",
        SystemFile::new("invoice_2025.pdf", ".pdf", "2.3 MB", "16/03/2024 11:20", "Lectura"),
    );
    let crypto_miner = inv.add_file(
        "C:/Users/Admin/Downloads",
        SystemFile::new("crypto_miner.exe", ".exe", "320 KB", "15/03/2024 03:15", "Ejecución")
            .infected(MalwareKind::Miner, 92),
    );
    let kernel32 = inv.add_file(
        "C:/Windows/System32",
        SystemFile::new("kernel32.dll", ".dll", "1.2 MB", "10/03/2024 08:00", "Sistema"),
    );
    let x_virus = inv.add_file(
        "C:/Windows/System32",
        SystemFile::new("x_virus.exe", ".exe", "520 KB", "14/03/2024 04:30", "Ejecución")
            .infected(MalwareKind::Ransomware, 95),
    );
    let spy_tool = inv.add_file(
        "C:/Windows/System32",
        SystemFile::new("spy_tool.exe", ".exe", "280 KB", "15/03/2024 02:45", "Ejecución")
            .infected(MalwareKind::Spyware, 78),
    );
    inv.add_file(
        "C:/Temp",
        SystemFile::new("temp_file.tmp", ".tmp", "15 KB", "16/03/2024 12:05", "Lectura/Escritura"),
    );
    let adware_bundle = inv.add_file(
        "C:/Temp",
        SystemFile::new("adware_bundle.exe", ".exe", "650 KB", "15/03/2024 04:30", "Ejecución")
            .infected(MalwareKind::Adware, 88),
    );

    SampleFiles {
        inventory: inv,
        readme,
        free_game,
        crypto_miner,
        x_virus,
        spy_tool,
        adware_bundle,
        kernel32,
    }
}

/// Route library logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
