//! Property tests for the resource and session invariants.

use netdefenders_sim::{
    ActionKind, GameStatus, Level2GameManager, ResourceBar, SymptomKind, SymptomManager,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum BarOp {
    Consume(f64),
    Restore(f64),
    Drain { rate: f64, dt: f64 },
}

fn bar_op() -> impl Strategy<Value = BarOp> {
    prop_oneof![
        (-50.0..200.0f64).prop_map(BarOp::Consume),
        (-50.0..200.0f64).prop_map(BarOp::Restore),
        (0.0..10.0f64, 0.0..5000.0f64).prop_map(|(rate, dt)| BarOp::Drain { rate, dt }),
    ]
}

fn symptom_kind() -> impl Strategy<Value = SymptomKind> {
    prop::sample::select(SymptomKind::ALL.to_vec())
}

#[derive(Clone, Debug)]
enum SessionOp {
    Update(f64),
    Activate(SymptomKind),
    Clean(bool),
    Quarantine(bool),
    Execute(ActionKind),
    MalwareQuiz(bool),
}

fn session_op() -> impl Strategy<Value = SessionOp> {
    prop_oneof![
        (0.0..3000.0f64).prop_map(SessionOp::Update),
        symptom_kind().prop_map(SessionOp::Activate),
        any::<bool>().prop_map(SessionOp::Clean),
        any::<bool>().prop_map(SessionOp::Quarantine),
        prop::sample::select(ActionKind::ALL.to_vec()).prop_map(SessionOp::Execute),
        any::<bool>().prop_map(SessionOp::MalwareQuiz),
    ]
}

fn apply(manager: &mut Level2GameManager, op: &SessionOp) {
    match *op {
        SessionOp::Update(dt) => manager.update(dt),
        SessionOp::Activate(kind) => manager.activate_virus_symptom(kind, None),
        SessionOp::Clean(had_virus) => manager.file_cleaned(had_virus, None),
        SessionOp::Quarantine(had_virus) => manager.file_quarantined(had_virus, None),
        SessionOp::Execute(kind) => {
            manager.execute_action(kind);
        }
        SessionOp::MalwareQuiz(correct) => manager.answer_malware_quiz(correct),
    }
}

proptest! {
    #[test]
    fn prop_bar_stays_in_bounds(ops in prop::collection::vec(bar_op(), 0..64)) {
        let mut bar = ResourceBar::full(100.0);
        for op in ops {
            match op {
                BarOp::Consume(amount) => { bar.consume(amount); }
                BarOp::Restore(amount) => bar.restore(amount),
                BarOp::Drain { rate, dt } => {
                    bar.set_drain_rate(rate);
                    bar.passive_drain(dt);
                }
            }
            prop_assert!(bar.current() >= 0.0);
            prop_assert!(bar.current() <= bar.max());
        }
    }

    #[test]
    fn prop_toggles_are_idempotent(kinds in prop::collection::vec(symptom_kind(), 1..8)) {
        let mut once = SymptomManager::new();
        let mut twice = SymptomManager::new();
        for &kind in &kinds {
            once.activate_symptom(kind, None);
            twice.activate_symptom(kind, None);
            twice.activate_symptom(kind, None);
        }
        prop_assert_eq!(&once, &twice);

        for &kind in &kinds {
            once.deactivate_symptom(kind);
            twice.deactivate_symptom(kind);
            twice.deactivate_symptom(kind);
        }
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.has_active_symptoms());
    }

    #[test]
    fn prop_update_uses_active_drain(
        kinds in prop::collection::vec(symptom_kind(), 0..6),
        dt in 0.0..2000.0f64,
    ) {
        let mut manager = Level2GameManager::new(5);
        for kind in kinds {
            manager.activate_virus_symptom(kind, None);
        }
        let expected: f64 = manager
            .symptoms()
            .active_symptoms()
            .iter()
            .map(|s| s.resource_drain())
            .sum();

        manager.update(dt);
        prop_assert!((manager.resources().borrow().passive_drain_rate() - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_terminal_state_is_frozen(
        ops in prop::collection::vec(session_op(), 0..80),
        tail in prop::collection::vec(session_op(), 1..20),
    ) {
        let mut manager = Level2GameManager::new(3);
        for op in &ops {
            apply(&mut manager, op);
            let current = manager.resources().borrow().current();
            prop_assert!((0.0..=100.0).contains(&current));
        }
        // Force an ending if the random prefix did not reach one.
        manager.activate_virus_symptom(SymptomKind::Slowdown, None);
        manager.update(100_000.0);
        prop_assert!(manager.game_state().is_terminal());

        let state = manager.game_state();
        let resources = manager.resources().borrow().current();
        let score = manager.score().current_score();
        for op in &tail {
            apply(&mut manager, op);
        }
        manager.update(1000.0);

        prop_assert_eq!(manager.game_state(), state);
        prop_assert_eq!(manager.resources().borrow().current(), resources);
        prop_assert_eq!(manager.score().current_score(), score);
    }

    #[test]
    fn prop_depleted_pool_always_loses(
        kinds in prop::collection::vec(symptom_kind(), 1..4),
        handled in 0u32..5,
    ) {
        let mut manager = Level2GameManager::new(3);
        for kind in kinds {
            manager.activate_virus_symptom(kind, None);
        }
        for _ in 0..handled {
            manager.file_cleaned(true, None);
        }
        // Long enough to empty the pool at the slowest drain.
        manager.update(1_000_000.0);
        prop_assert_eq!(manager.game_state(), GameStatus::Defeat);
    }
}
