//! Level-2 session orchestration.
//!
//! `Level2GameManager` is the single owner of the session state. The game
//! loop calls `update(dt)` once per frame and the input layer calls the
//! action entry points; the UI reads `game_stats()` instead of keeping its
//! own copy of the numbers.
//!
//! ## Tick order
//!
//! 1. Recompute the drain rate from the active symptoms.
//! 2. Apply passive drain.
//! 3. Check defeat.
//! 4. Check victory.
//!
//! Defeat is checked first, so a tick that empties the pool and completes
//! the last threat ends in defeat.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checkpoint::SessionCheckpoint;
use super::clock::{Clock, WallClock};
use super::events::{SessionEvent, SessionEventKind};
use crate::actions::{ActionKind, ActionTimer, ActionTimerFactory};
use crate::conditions::{DefeatConditionChecker, VictoryConditionChecker};
use crate::core::{ConfigError, SimulationConfig};
use crate::files::{FileId, FileInventory, FileMetadata, FolderScanReport, ScanReport, Scanner};
use crate::resources::{ResourceBar, SharedResourceBar};
use crate::scoring::{QuizBonusSystem, Rank, ScoreManager};
use crate::symptoms::{SymptomKind, SymptomManager};

/// Level number used for the session's score.
pub const LEVEL_NUMBER: u8 = 2;

/// Session state. Only moves forward out of `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Victory,
    Defeat,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Read-only snapshot for the HUD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub state: GameStatus,
    pub resources: f64,
    pub resources_percentage: f64,
    pub drain_rate: f64,
    pub score: i64,
    pub best_score: i64,
    pub combo: u32,
    pub rank: Rank,
    pub threats_handled: u32,
    pub total_threats: u32,
    pub completion: f64,
    pub active_symptoms: usize,
    pub is_critical: bool,
    pub mistakes: u32,
    /// Wall-clock seconds since the session started.
    pub elapsed_time: f64,
}

/// What an action's target was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionTarget {
    File(FileId),
    Folder(String),
}

/// Result of applying a completed action.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Inspected(FileMetadata),
    Scanned(ScanReport),
    FolderScanned(FolderScanReport),
    Quarantined { file: FileId, had_virus: bool },
    Cleaned { file: FileId, had_virus: bool },
    /// The file was already quarantined or eliminated; nothing changed.
    AlreadyHandled(FileId),
    /// The target does not exist or does not fit the action.
    InvalidTarget,
    /// The timer has not finished counting down.
    Unfinished,
    /// The timer was not issued by this session or was already applied.
    NotIssued,
    /// The session has ended; nothing changed.
    SessionOver,
}

/// One Level-2 playthrough.
///
/// Construct a new manager to replay; a finished session stays finished.
pub struct Level2GameManager<C: Clock = WallClock> {
    config: SimulationConfig,
    resources: SharedResourceBar,
    symptoms: SymptomManager,
    victory: VictoryConditionChecker,
    defeat: DefeatConditionChecker,
    quiz_bonus: QuizBonusSystem,
    score: ScoreManager,
    game_state: GameStatus,
    clock: C,
    sim_time_ms: f64,
    files: FileInventory,
    scanner: Scanner,
    mistakes: u32,
    events: Vector<SessionEvent>,
    next_ticket: u64,
    pending: FxHashSet<u64>,
}

impl Level2GameManager<WallClock> {
    /// Default-balanced session with `total_threats` threats and no files.
    #[must_use]
    pub fn new(total_threats: u32) -> Self {
        Self::assemble(
            SimulationConfig::default(),
            total_threats,
            FileInventory::new(),
            WallClock::new(),
        )
    }
}

impl<C: Clock> Level2GameManager<C> {
    fn assemble(config: SimulationConfig, total_threats: u32, files: FileInventory, clock: C) -> Self {
        let resources = SharedResourceBar::new(ResourceBar::full(config.max_resources));
        let defeat = DefeatConditionChecker::with_threshold(resources.clone(), config.critical_threshold);
        let scanner = Scanner::new(config.seed);

        info!(total_threats, files = files.len(), "level 2 session started");

        let mut manager = Self {
            config,
            resources,
            symptoms: SymptomManager::new(),
            victory: VictoryConditionChecker::new(total_threats),
            defeat,
            quiz_bonus: QuizBonusSystem::new(),
            score: ScoreManager::new(LEVEL_NUMBER),
            game_state: GameStatus::Playing,
            clock,
            sim_time_ms: 0.0,
            files,
            scanner,
            mistakes: 0,
            events: Vector::new(),
            next_ticket: 0,
            pending: FxHashSet::default(),
        };

        let initial: Vec<(SymptomKind, String)> = manager
            .files
            .iter()
            .filter_map(|(_, f)| f.symptom().map(|s| (s, f.name().to_string())))
            .collect();
        for (symptom, source) in initial {
            manager.activate_virus_symptom(symptom, Some(source));
        }

        manager
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn game_state(&self) -> GameStatus {
        self.game_state
    }

    /// Read handle to the shared resource pool.
    #[must_use]
    pub fn resources(&self) -> &SharedResourceBar {
        &self.resources
    }

    #[must_use]
    pub fn symptoms(&self) -> &SymptomManager {
        &self.symptoms
    }

    #[must_use]
    pub fn victory_checker(&self) -> &VictoryConditionChecker {
        &self.victory
    }

    #[must_use]
    pub fn defeat_checker(&self) -> &DefeatConditionChecker {
        &self.defeat
    }

    #[must_use]
    pub fn quiz_bonus(&self) -> &QuizBonusSystem {
        &self.quiz_bonus
    }

    #[must_use]
    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    #[must_use]
    pub fn files(&self) -> &FileInventory {
        &self.files
    }

    /// Session log. Cloning is O(1).
    #[must_use]
    pub fn events(&self) -> &Vector<SessionEvent> {
        &self.events
    }

    #[must_use]
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Wall-clock seconds since the session started.
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    fn record(&mut self, kind: SessionEventKind) {
        self.events.push_back(SessionEvent {
            at_ms: self.sim_time_ms,
            kind,
        });
    }

    // === Per-frame ===

    /// Advance the session by `dt` milliseconds. Inert once finished.
    pub fn update(&mut self, dt: f64) {
        if self.game_state.is_terminal() {
            return;
        }
        let dt = dt.max(0.0);
        self.sim_time_ms += dt;

        let drain = self.symptoms.total_drain();
        {
            let mut bar = self.resources.borrow_mut();
            bar.set_drain_rate(drain);
            bar.passive_drain(dt);
        }

        if self.defeat.check_defeat() {
            self.game_state = GameStatus::Defeat;
            info!(score = self.score.current_score(), "level 2 lost: resources depleted");
            self.record(SessionEventKind::Defeat);
            return;
        }

        if self.victory.check_victory() {
            self.game_state = GameStatus::Victory;
            self.award_victory_bonus();
        }
    }

    fn award_victory_bonus(&mut self) {
        let remaining = self.resources.borrow().current();
        let resource_bonus = (remaining * self.config.rewards.resource_bonus_per_unit) as i64;
        let time_bonus = self.config.rewards.time_bonus.points_for(self.elapsed_time());

        self.score.add_points(resource_bonus, false);
        self.score.add_points(time_bonus, false);

        info!(
            resource_bonus,
            time_bonus,
            score = self.score.current_score(),
            "level 2 won"
        );
        self.record(SessionEventKind::Victory {
            resource_bonus,
            time_bonus,
        });
    }

    // === Player actions ===

    /// Charge an action's cost and hand back its running timer.
    ///
    /// The cost is deducted even if it empties the pool; the next `update`
    /// then reports defeat. Affordability is the caller's check. Returns
    /// `None` only when the session has already ended.
    pub fn execute_action(&mut self, kind: ActionKind) -> Option<ActionTimer> {
        self.charge(ActionTimerFactory::create(kind))
    }

    /// `execute_action` keyed by wire name; unknown names get the fallback
    /// timing and cost.
    pub fn execute_action_by_name(&mut self, action_name: &str) -> Option<ActionTimer> {
        self.charge(ActionTimerFactory::create_by_name(action_name))
    }

    fn charge(&mut self, mut timer: ActionTimer) -> Option<ActionTimer> {
        if self.game_state.is_terminal() {
            return None;
        }
        timer.issue(self.next_ticket);
        self.pending.insert(self.next_ticket);
        self.next_ticket += 1;
        let remaining = {
            let mut bar = self.resources.borrow_mut();
            bar.consume(timer.cost());
            bar.current()
        };
        debug!(action = timer.action_name(), cost = timer.cost(), remaining, "action started");
        self.record(SessionEventKind::ActionStarted {
            action: timer.action_name().to_string(),
            cost: timer.cost(),
        });
        Some(timer)
    }

    /// A file was cleaned.
    ///
    /// Infected: one elimination, combo-scaled points, and the symptom (if
    /// given) is resolved. Safe: a score penalty only.
    pub fn file_cleaned(&mut self, had_virus: bool, symptom: Option<SymptomKind>) {
        self.apply_clean(had_virus, symptom, 0.0);
    }

    /// A file was quarantined. Same shape as `file_cleaned` with smaller
    /// stakes.
    pub fn file_quarantined(&mut self, had_virus: bool, symptom: Option<SymptomKind>) {
        self.apply_quarantine(had_virus, symptom, 0.0);
    }

    fn apply_clean(&mut self, had_virus: bool, symptom: Option<SymptomKind>, resource_penalty: f64) {
        if self.game_state.is_terminal() {
            return;
        }
        if had_virus {
            self.victory.register_elimination();
            let points = self.score.add_points(self.config.rewards.clean_infected, true);
            self.record(SessionEventKind::ThreatEliminated { points });
            if let Some(symptom) = symptom {
                self.resolve_symptom(symptom);
            }
        } else {
            self.false_positive(self.config.rewards.clean_safe_penalty, resource_penalty);
        }
    }

    fn apply_quarantine(&mut self, had_virus: bool, symptom: Option<SymptomKind>, resource_penalty: f64) {
        if self.game_state.is_terminal() {
            return;
        }
        if had_virus {
            self.victory.register_quarantine();
            let points = self.score.add_points(self.config.rewards.quarantine_infected, true);
            self.record(SessionEventKind::ThreatQuarantined { points });
            if let Some(symptom) = symptom {
                self.resolve_symptom(symptom);
            }
        } else {
            self.false_positive(self.config.rewards.quarantine_safe_penalty, resource_penalty);
        }
    }

    /// A scan finished. Only infected files are worth points.
    pub fn file_scanned(&mut self, is_infected: bool) {
        if self.game_state.is_terminal() || !is_infected {
            return;
        }
        let points = self.score.add_points(self.config.rewards.scan_infected, false);
        self.record(SessionEventKind::InfectedScanned { points });
    }

    /// Turn on a symptom, recording which file caused it.
    pub fn activate_virus_symptom(&mut self, symptom: SymptomKind, source_file: Option<String>) {
        if self.game_state.is_terminal() {
            return;
        }
        self.symptoms.activate_symptom(symptom, source_file.clone());
        self.record(SessionEventKind::SymptomActivated {
            symptom,
            source: source_file,
        });
    }

    /// String-keyed `activate_virus_symptom`. Accepts symptom or malware
    /// names; returns `false` for anything else or once the session is over.
    pub fn activate_virus_symptom_by_name(&mut self, name: &str, source_file: Option<String>) -> bool {
        if self.game_state.is_terminal() {
            return false;
        }
        match SymptomKind::resolve(name) {
            Some(symptom) => {
                self.activate_virus_symptom(symptom, source_file);
                true
            }
            None => {
                warn!(name, "unknown symptom name");
                false
            }
        }
    }

    /// Record the post-level quiz and award its bonus. Allowed after the
    /// session has ended.
    pub fn complete_quiz(&mut self, correct: u32, total: u32) -> i64 {
        let bonus = self.quiz_bonus.complete_quiz(correct, total);
        self.score.add_points(bonus, false);
        self.record(SessionEventKind::QuizCompleted {
            correct: self.quiz_bonus.correct_answers(),
            total,
            bonus,
        });
        bonus
    }

    /// In-level malware question: a right answer restores resources, a
    /// wrong one costs some.
    pub fn answer_malware_quiz(&mut self, correct: bool) {
        if self.game_state.is_terminal() {
            return;
        }
        let delta = {
            let mut bar = self.resources.borrow_mut();
            let before = bar.current();
            if correct {
                bar.restore(self.config.quiz_correct_restore);
            } else {
                bar.consume(self.config.quiz_wrong_cost);
            }
            bar.current() - before
        };
        self.record(SessionEventKind::MalwareQuizAnswered { correct, delta });
    }

    fn resolve_symptom(&mut self, symptom: SymptomKind) {
        if self.symptoms.is_active(symptom) {
            self.symptoms.deactivate_symptom(symptom);
            self.record(SessionEventKind::SymptomResolved { symptom });
        }
    }

    fn false_positive(&mut self, penalty: i64, resource_penalty: f64) {
        self.score.subtract_points(penalty);
        self.mistakes += 1;
        if resource_penalty > 0.0 {
            self.resources.borrow_mut().consume(resource_penalty);
        }
        debug!(penalty, resource_penalty, mistakes = self.mistakes, "false positive");
        self.record(SessionEventKind::FalsePositive {
            penalty,
            resource_penalty,
        });
    }

    // === File-aware completion ===

    /// Apply an action whose timer just completed.
    ///
    /// The timer must be one handed out by `execute_action`, finished, and
    /// not applied before; its kind decides what happens to the target.
    /// Quarantined files can still be inspected and scanned. Resolved files
    /// are never counted twice, and a symptom shared by several infected
    /// files stays active until the last of them is handled.
    pub fn complete_action(&mut self, timer: &ActionTimer, target: &ActionTarget) -> ActionOutcome {
        if self.game_state.is_terminal() {
            return ActionOutcome::SessionOver;
        }
        if !timer.is_completed() {
            return ActionOutcome::Unfinished;
        }
        if !timer.ticket().is_some_and(|ticket| self.pending.remove(&ticket)) {
            return ActionOutcome::NotIssued;
        }
        let Some(kind) = timer.kind() else {
            return ActionOutcome::InvalidTarget;
        };

        let id = match (kind, target) {
            (ActionKind::ScanFolder, ActionTarget::Folder(directory)) => {
                return ActionOutcome::FolderScanned(self.scanner.scan_folder(&self.files, directory));
            }
            (ActionKind::ScanFolder, ActionTarget::File(_)) | (_, ActionTarget::Folder(_)) => {
                return ActionOutcome::InvalidTarget;
            }
            (_, ActionTarget::File(id)) => *id,
        };

        let Some(file) = self.files.get(id) else {
            return ActionOutcome::InvalidTarget;
        };
        let handled = match kind {
            ActionKind::Inspect | ActionKind::ScanFile => file.is_eliminated(),
            _ => file.is_resolved(),
        };
        if handled {
            return ActionOutcome::AlreadyHandled(id);
        }

        match kind {
            ActionKind::Inspect => ActionOutcome::Inspected(file.metadata()),
            ActionKind::ScanFile => {
                let report = self.scanner.scan_file(file);
                self.file_scanned(report.detected.is_some());
                ActionOutcome::Scanned(report)
            }
            ActionKind::Quarantine => {
                let (had_virus, symptom) = self.mark_file(id, FileResolution::Quarantine);
                let penalty = self.config.quarantine_safe_resource_penalty;
                self.apply_quarantine(had_virus, symptom, penalty);
                ActionOutcome::Quarantined { file: id, had_virus }
            }
            ActionKind::CleanMalware | ActionKind::CleanSafe => {
                let (had_virus, symptom) = self.mark_file(id, FileResolution::Eliminate);
                // Cleaning a safe file costs the full penalty; whatever the
                // timer already charged counts toward it.
                let penalty = (self.config.clean_safe_resource_penalty - timer.cost()).max(0.0);
                self.apply_clean(had_virus, symptom, penalty);
                ActionOutcome::Cleaned { file: id, had_virus }
            }
            ActionKind::ScanFolder => ActionOutcome::InvalidTarget,
        }
    }

    /// Flag a file and work out which symptom, if any, it was the last
    /// unresolved cause of.
    fn mark_file(&mut self, id: FileId, resolution: FileResolution) -> (bool, Option<SymptomKind>) {
        let Some(file) = self.files.get_mut(id) else {
            return (false, None);
        };
        match resolution {
            FileResolution::Quarantine => file.mark_quarantined(),
            FileResolution::Eliminate => file.mark_eliminated(),
        }
        let had_virus = file.is_infected();
        let symptom = file
            .symptom()
            .filter(|s| !self.files.has_unresolved_infection(*s, id));
        (had_virus, symptom)
    }

    // === Checkpoints ===

    /// Capture everything needed to resume this session later.
    ///
    /// Timers handed out before the checkpoint stay valid after `restore`.
    #[must_use]
    pub fn checkpoint(&self) -> SessionCheckpoint {
        let mut pending: Vec<u64> = self.pending.iter().copied().collect();
        pending.sort_unstable();
        SessionCheckpoint {
            config: self.config.clone(),
            resources: self.resources.snapshot(),
            symptoms: self.symptoms.clone(),
            victory: self.victory.clone(),
            quiz_bonus: self.quiz_bonus.clone(),
            score: self.score.clone(),
            game_state: self.game_state,
            sim_time_ms: self.sim_time_ms,
            files: self.files.clone(),
            scanner: self.scanner.state(),
            mistakes: self.mistakes,
            events: self.events.clone(),
            next_ticket: self.next_ticket,
            pending,
        }
    }

    /// Resume a checkpointed session. Elapsed time restarts from `clock`.
    pub fn restore(checkpoint: SessionCheckpoint, clock: C) -> Result<Self, ConfigError> {
        checkpoint.config.validate()?;
        let resources = SharedResourceBar::new(checkpoint.resources);
        let defeat =
            DefeatConditionChecker::with_threshold(resources.clone(), checkpoint.config.critical_threshold);
        let (file_rng, folder_rng) = &checkpoint.scanner;

        info!(
            sim_time_ms = checkpoint.sim_time_ms,
            events = checkpoint.events.len(),
            "level 2 session restored"
        );

        Ok(Self {
            config: checkpoint.config,
            resources,
            symptoms: checkpoint.symptoms,
            victory: checkpoint.victory,
            defeat,
            quiz_bonus: checkpoint.quiz_bonus,
            score: checkpoint.score,
            game_state: checkpoint.game_state,
            clock,
            sim_time_ms: checkpoint.sim_time_ms,
            files: checkpoint.files,
            scanner: Scanner::from_state(file_rng, folder_rng),
            mistakes: checkpoint.mistakes,
            events: checkpoint.events,
            next_ticket: checkpoint.next_ticket,
            pending: checkpoint.pending.into_iter().collect(),
        })
    }

    // === Snapshot ===

    /// Everything the HUD shows.
    #[must_use]
    pub fn game_stats(&self) -> GameStats {
        let bar = self.resources.borrow();
        GameStats {
            state: self.game_state,
            resources: bar.current(),
            resources_percentage: bar.percentage(),
            drain_rate: bar.passive_drain_rate(),
            score: self.score.current_score(),
            best_score: self.score.best_score(),
            combo: self.score.combo(),
            rank: self.score.rank(),
            threats_handled: self.victory.threats_handled(),
            total_threats: self.victory.total_threats(),
            completion: self.victory.completion_percentage(),
            active_symptoms: self.symptoms.active_symptoms().len(),
            is_critical: self.defeat.is_critical(),
            mistakes: self.mistakes,
            elapsed_time: self.elapsed_time(),
        }
    }
}

#[derive(Clone, Copy)]
enum FileResolution {
    Quarantine,
    Eliminate,
}

/// Builder for sessions with custom balance, files or clock.
pub struct Level2Builder {
    config: SimulationConfig,
    total_threats: u32,
    files: Option<FileInventory>,
}

impl Default for Level2Builder {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            total_threats: 0,
            files: None,
        }
    }
}

impl Level2Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Threat total for sessions without files.
    pub fn total_threats(mut self, total: u32) -> Self {
        self.total_threats = total;
        self
    }

    /// Play over a file inventory. The threat total becomes its infected
    /// count and every infected file's symptom starts active.
    pub fn files(mut self, files: FileInventory) -> Self {
        self.files = Some(files);
        self
    }

    /// Build with the real clock.
    pub fn build(self) -> Result<Level2GameManager<WallClock>, ConfigError> {
        self.build_with_clock(WallClock::new())
    }

    /// Build with a custom clock.
    pub fn build_with_clock<C: Clock>(self, clock: C) -> Result<Level2GameManager<C>, ConfigError> {
        self.config.validate()?;
        let (total_threats, files) = match self.files {
            Some(files) => (files.infected_count(), files),
            None => (self.total_threats, FileInventory::new()),
        };
        Ok(Level2GameManager::assemble(self.config, total_threats, files, clock))
    }
}
