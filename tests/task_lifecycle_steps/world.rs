//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, RecordingNotifier};
use reviewdesk::task::{
    adapters::SequenceRandom,
    domain::{TaskId, TaskTemplate},
    services::{EngineConfig, LifecycleEngine},
};
use rstest::fixture;

/// Engine type used by the BDD world.
pub type TestEngine = LifecycleEngine<ManualClock, SequenceRandom, RecordingNotifier>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub engine: TestEngine,
    pub clock: Arc<ManualClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub task_id: Option<TaskId>,
    pub pool: Vec<TaskTemplate>,
}

impl LifecycleWorld {
    /// Creates a world around an empty engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the default configuration is rejected.
    pub fn new() -> Result<Self, eyre::Report> {
        let clock = Arc::new(ManualClock::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = Self::fresh_engine(&clock, &notifier)?;
        Ok(Self {
            engine,
            clock,
            notifier,
            task_id: None,
            pool: Vec::new(),
        })
    }

    /// Builds an empty engine sharing this world's clock and notifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the default configuration is rejected.
    pub fn fresh_engine(
        clock: &Arc<ManualClock>,
        notifier: &Arc<RecordingNotifier>,
    ) -> Result<TestEngine, eyre::Report> {
        Ok(LifecycleEngine::new(
            EngineConfig::default(),
            Arc::clone(clock),
            SequenceRandom::default(),
            Arc::clone(notifier),
        )?)
    }

    /// Returns the id of the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been set up yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::new().unwrap_or_else(|err| panic!("scenario world must build: {err}"))
}
