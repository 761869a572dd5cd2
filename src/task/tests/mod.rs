//! Unit tests for the task lifecycle.

mod config_tests;

use crate::task::{
    adapters::SequenceRandom,
    domain::{Confidence, NewTask, Task, TaskId},
    ports::CompletionNotifier,
    services::{EngineConfig, LifecycleEngine},
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock that only moves when told to.
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            now: Mutex::new(start),
        }
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += Duration::milliseconds(ms);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now()
    }
}

/// Notifier that remembers the ids it was told about.
#[derive(Default)]
pub(super) struct RecordingNotifier {
    completed: Mutex<Vec<TaskId>>,
}

impl RecordingNotifier {
    pub(super) fn completed(&self) -> Vec<TaskId> {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(super) fn count_for(&self, id: TaskId) -> usize {
        self.completed().iter().filter(|seen| **seen == id).count()
    }
}

impl CompletionNotifier for RecordingNotifier {
    fn task_completed(&self, task: &Task) {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.id());
    }
}

pub(super) type TestEngine = LifecycleEngine<ManualClock, SequenceRandom, RecordingNotifier>;

/// Engine wired to a manual clock, a scripted random source, and a
/// recording notifier.
pub(super) struct Harness {
    pub(super) engine: TestEngine,
    pub(super) clock: Arc<ManualClock>,
    pub(super) notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub(super) fn new(random: SequenceRandom) -> Self {
        Self::with_config(EngineConfig::default(), random)
    }

    pub(super) fn with_config(config: EngineConfig, random: SequenceRandom) -> Self {
        let clock = Arc::new(ManualClock::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = LifecycleEngine::new(config, Arc::clone(&clock), random, Arc::clone(&notifier))
            .unwrap_or_else(|err| panic!("test configuration must be valid: {err}"));
        Self {
            engine,
            clock,
            notifier,
        }
    }

    /// Adds a task with the given confidence and returns its id.
    pub(super) fn add(&mut self, title: &str, score: u8) -> TaskId {
        let confidence = Confidence::new(score)
            .unwrap_or_else(|err| panic!("test confidence must be valid: {err}"));
        self.engine
            .add_task(NewTask::new(title, "Analytics", confidence))
            .unwrap_or_else(|err| panic!("test task must be valid: {err}"))
    }

    pub(super) fn task(&self, id: TaskId) -> &Task {
        self.engine
            .task(id)
            .unwrap_or_else(|| panic!("task {id} must exist"))
    }

    /// Advances a freshly added task until its pipeline resolves.
    pub(super) fn run_pipeline(&mut self) {
        for _ in 0..5 {
            self.engine.advance_stage();
        }
    }
}
