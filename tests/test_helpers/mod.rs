//! Shared clocks and notifiers for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use reviewdesk::task::{
    domain::{Task, TaskId},
    ports::CompletionNotifier,
};
use std::sync::{Mutex, PoisonError};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock pinned to a fixed start time.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(epoch()),
        }
    }

    /// Moves the clock forward.
    pub fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += Duration::milliseconds(ms);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clock that follows tokio's (pausable) time source.
pub struct TokioClock {
    start: tokio::time::Instant,
    base: DateTime<Utc>,
}

impl TokioClock {
    /// Creates a clock anchored at the current tokio instant.
    pub fn new() -> Self {
        Self {
            start: tokio::time::Instant::now(),
            base: epoch(),
        }
    }
}

impl Clock for TokioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let elapsed = Duration::from_std(self.start.elapsed()).unwrap_or_else(|_| Duration::zero());
        self.base + elapsed
    }
}

/// Notifier that remembers the ids it was told about.
#[derive(Default)]
pub struct RecordingNotifier {
    completed: Mutex<Vec<TaskId>>,
}

impl RecordingNotifier {
    /// Returns how many notifications named `id`.
    pub fn count_for(&self, id: TaskId) -> usize {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|seen| **seen == id)
            .count()
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
