//! Per-frame cost of a Level-2 session.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netdefenders_sim::{
    ActionKind, ActionTarget, FileInventory, Level2Builder, MalwareKind, SymptomKind, SystemFile,
};

fn inventory() -> FileInventory {
    let mut inv = FileInventory::new();
    inv.add_directory("C:/", &["Users", "Windows", "Temp"]);
    for (i, malware) in MalwareKind::ALL.into_iter().enumerate() {
        inv.add_file(
            "C:/Temp",
            SystemFile::new(format!("threat_{i}.exe"), ".exe", "300 KB", "15/03/2024 04:30", "Ejecución")
                .infected(malware, 80),
        );
        inv.add_file(
            "C:/Temp",
            SystemFile::new(format!("notes_{i}.txt"), ".txt", "4 KB", "16/03/2024 10:00", "Lectura"),
        );
    }
    inv
}

fn bench_update(c: &mut Criterion) {
    c.bench_function("update_all_symptoms", |b| {
        let mut manager = Level2Builder::new().total_threats(4).build().unwrap_or_else(|e| panic!("{e}"));
        for kind in SymptomKind::ALL {
            manager.activate_virus_symptom(kind, None);
        }
        b.iter(|| {
            // Keep the session alive so every iteration does the full tick.
            manager.answer_malware_quiz(true);
            manager.update(black_box(16.0));
        });
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("scan_and_clean_session", |b| {
        b.iter(|| {
            let mut manager = Level2Builder::new()
                .files(inventory())
                .build()
                .unwrap_or_else(|e| panic!("{e}"));
            let ids: Vec<_> = manager.files().iter().map(|(id, _)| id).collect();
            for id in ids {
                let target = ActionTarget::File(id);
                for kind in [ActionKind::ScanFile, ActionKind::CleanMalware] {
                    let Some(mut timer) = manager.execute_action(kind) else {
                        break;
                    };
                    while !timer.update(250.0) {
                        manager.update(250.0);
                    }
                    manager.complete_action(&timer, &target);
                }
            }
            black_box(manager.game_stats())
        });
    });
}

criterion_group!(benches, bench_update, bench_session);
criterion_main!(benches);
