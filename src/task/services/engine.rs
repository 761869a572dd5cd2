//! The task lifecycle engine.
//!
//! The engine owns the task collection and moves it forward through three
//! tick operations (stage advance, feedback simulation, and injection) plus
//! a handful of explicit operator actions. All operations are synchronous
//! and total: unknown task ids are ignored and malformed templates are
//! skipped.

use super::{EngineConfig, EngineConfigError, reconcile_selection, rotation::TemplateRotation};
use crate::task::{
    domain::{
        Confidence, NewTask, SentStatus, Task, TaskDomainError, TaskId, TaskStatus, TaskTemplate,
    },
    ports::{CompletionNotifier, RandomSource},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// In-memory task lifecycle engine.
///
/// Time comes from the injected [`Clock`] and every random decision from the
/// injected [`RandomSource`], so a host can replay any run exactly.
pub struct LifecycleEngine<C, R, N>
where
    C: Clock + Send + Sync,
    R: RandomSource,
    N: CompletionNotifier,
{
    config: EngineConfig,
    threshold: Confidence,
    clock: Arc<C>,
    random: R,
    notifier: Arc<N>,
    tasks: Vec<Task>,
    selected: Option<TaskId>,
    rotation: TemplateRotation,
}

impl<C, R, N> LifecycleEngine<C, R, N>
where
    C: Clock + Send + Sync,
    R: RandomSource,
    N: CompletionNotifier,
{
    /// Creates an engine with an empty task collection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] when `config` fails validation.
    pub fn new(
        config: EngineConfig,
        clock: Arc<C>,
        random: R,
        notifier: Arc<N>,
    ) -> Result<Self, EngineConfigError> {
        config.validate()?;
        let threshold = config.threshold()?;
        Ok(Self {
            config,
            threshold,
            clock,
            random,
            notifier,
            tasks: Vec::new(),
            selected: None,
            rotation: TemplateRotation::default(),
        })
    }

    /// Seeds the engine with existing tasks, keeping collection order.
    ///
    /// A task whose id is already present is dropped.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        for task in tasks {
            if self.task(task.id()).is_some() {
                warn!(task_id = %task.id(), "duplicate task id while seeding; skipped");
                continue;
            }
            self.tasks.push(task);
        }
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns every task in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the selected incoming task, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<TaskId> {
        self.selected
    }

    /// Replaces the selection without applying the selection policy.
    pub const fn select(&mut self, id: Option<TaskId>) {
        self.selected = id;
    }

    /// Re-applies the selection policy and returns the result.
    pub fn update_selection(&mut self) -> Option<TaskId> {
        self.selected = reconcile_selection(&self.tasks, self.selected);
        self.selected
    }

    /// Adds a task in the first pipeline stage and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the input has a blank title or
    /// requestor.
    pub fn add_task(&mut self, input: NewTask) -> Result<TaskId, TaskDomainError> {
        let task = Task::create(input, &*self.clock)?;
        let id = task.id();
        info!(task_id = %id, confidence = task.confidence().value(), "task added");
        self.tasks.push(task);
        Ok(id)
    }

    /// Moves every pipeline task forward by exactly one step.
    ///
    /// Stages follow the configured stage order. Tasks leaving the last stage
    /// go to `review` when their confidence is
    /// below the threshold and to `sent` otherwise. Tasks outside the
    /// pipeline are untouched.
    pub fn advance_stage(&mut self) {
        let now = self.clock.utc();
        let order = &self.config.stage_order;
        for task in &mut self.tasks {
            let previous = task.status();
            if let Some(status) = task.advance_stage(order, self.threshold, now) {
                debug!(
                    task_id = %task.id(),
                    from = %previous,
                    to = %status,
                    confidence = task.confidence().value(),
                    "stage advanced"
                );
                if !status.is_pipeline_stage() {
                    info!(task_id = %task.id(), outcome = %status, "pipeline resolved");
                }
            }
        }
    }

    /// Resolves sent tasks against simulated requestor behaviour.
    ///
    /// Per task and tick, at most one of these fires, in order of
    /// precedence: approval once the wait period has elapsed, rejection back
    /// to review for a viewed task, and promotion from pending to viewed
    /// after a randomized delay.
    pub fn simulate_feedback(&mut self) {
        let now = self.clock.utc();
        let mut completed = Vec::new();

        for task in &mut self.tasks {
            if task.status() != TaskStatus::Sent {
                continue;
            }
            let waited = elapsed_ms(task, now);

            if waited > self.config.wait_period_ms {
                task.approve_after_wait(now);
                info!(task_id = %task.id(), waited_ms = waited, "requestor approved task");
                completed.push(task.clone());
            } else if task.sent_status() == Some(SentStatus::Viewed)
                && self.random.chance(self.config.regression_probability)
            {
                task.regress_to_review(now);
                info!(task_id = %task.id(), "requestor rejected task; back to review");
            } else if task.sent_status() == Some(SentStatus::Pending) {
                let delay = self.random.between(
                    self.config.viewed_delay_min_ms,
                    self.config.viewed_delay_max_ms,
                );
                if waited > delay {
                    task.mark_viewed(now);
                    debug!(task_id = %task.id(), waited_ms = waited, "requestor viewed task");
                }
            }
        }

        self.notify(&completed);
    }

    /// Synthesizes one task from `pool` and appends it in `ingesting`.
    ///
    /// Malformed templates are skipped, templates whose title matches a
    /// non-terminal task are not reused, and the rotation avoids repeating
    /// templates until all have been used. Returns `None` when no template
    /// qualifies.
    pub fn inject_task(&mut self, pool: &[TaskTemplate]) -> Option<&Task> {
        let candidates: Vec<&TaskTemplate> = pool
            .iter()
            .filter(|template| match template.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(title = %template.title, error = %err, "skipping malformed template");
                    false
                }
            })
            .collect();

        let active: HashSet<String> = self
            .tasks
            .iter()
            .filter(|task| !task.status().is_terminal())
            .map(|task| task.title().to_owned())
            .collect();

        let Some(template) = self
            .rotation
            .choose(&candidates, &active, &mut self.random)
        else {
            debug!(pool_size = pool.len(), "no template available for injection");
            return None;
        };

        let fallback = self.generated_confidence();
        let created = template
            .to_new_task(fallback)
            .and_then(|input| Task::create(input, &*self.clock));
        match created {
            Ok(task) => {
                info!(
                    task_id = %task.id(),
                    title = task.title(),
                    confidence = task.confidence().value(),
                    "injected task"
                );
                self.tasks.push(task);
                self.tasks.last()
            }
            Err(err) => {
                warn!(title = %template.title, error = %err, "template rejected at injection");
                None
            }
        }
    }

    /// Draws the pause before the next injection.
    pub fn next_injection_delay(&mut self) -> Duration {
        Duration::from_millis(self.random.between(
            self.config.injection_interval_min_ms,
            self.config.injection_interval_max_ms,
        ))
    }

    /// Approves a task immediately and fires the completion notification.
    ///
    /// Unknown ids and tasks that are already approved or learning are left
    /// alone.
    pub fn force_complete(&mut self, id: TaskId) {
        let now = self.clock.utc();
        let Some(task) = self.task_mut(id) else {
            debug!(task_id = %id, "force complete ignored: unknown task");
            return;
        };
        if task.status().is_terminal() {
            debug!(task_id = %id, status = %task.status(), "force complete ignored: already complete");
            return;
        }

        task.force_approve(now);
        info!(task_id = %id, "task force-completed");
        let snapshot = task.clone();
        self.notify(&[snapshot]);
    }

    /// Delivers a task to its requestor by hand.
    ///
    /// Used when an expert clears a `review` task. Unknown ids, tasks that
    /// are already sent, and completed tasks are left alone.
    pub fn send_to_requestor(&mut self, id: TaskId) {
        let now = self.clock.utc();
        let Some(task) = self.task_mut(id) else {
            debug!(task_id = %id, "send ignored: unknown task");
            return;
        };
        let status = task.status();
        if status.is_terminal() || status == TaskStatus::Sent {
            debug!(task_id = %id, status = %status, "send ignored");
            return;
        }

        task.mark_sent(now);
        info!(task_id = %id, from = %status, "task sent to requestor");
    }

    /// Delivers the selected task to its requestor, if one is selected.
    pub fn send_selected_to_requestor(&mut self) {
        if let Some(id) = self.selected {
            self.send_to_requestor(id);
        }
    }

    /// Moves an approved task into `learning`.
    ///
    /// Tasks in any other status and unknown ids are left alone.
    pub fn begin_learning(&mut self, id: TaskId) {
        let now = self.clock.utc();
        match self.task_mut(id) {
            Some(task) if task.status() == TaskStatus::Approved => {
                task.begin_learning(now);
                info!(task_id = %id, "task feeding knowledge graph");
            }
            Some(task) => {
                debug!(task_id = %id, status = %task.status(), "learning ignored: not approved");
            }
            None => debug!(task_id = %id, "learning ignored: unknown task"),
        }
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn generated_confidence(&mut self) -> Confidence {
        let low = u64::from(self.config.generated_confidence_min);
        let high = u64::from(self.config.generated_confidence_max).saturating_add(1);
        let drawn = u8::try_from(self.random.between(low, high)).unwrap_or(Confidence::MAX);
        Confidence::new(drawn).unwrap_or(self.threshold)
    }

    fn notify(&self, completed: &[Task]) {
        for task in completed {
            self.notifier.task_completed(task);
        }
    }
}

fn elapsed_ms(task: &Task, now: DateTime<Utc>) -> u64 {
    task.time_since_sent(now)
        .map(|elapsed| u64::try_from(elapsed.num_milliseconds()).unwrap_or_default())
        .unwrap_or_default()
}
