//! Task aggregate root and its lifecycle transitions.

use super::{
    Confidence, Priority, RequestorFeedback, SentStatus, TaskDomainError, TaskId, TaskStatus,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Cosmetic routing hints shown alongside a task.
///
/// Flags never influence lifecycle transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFlags {
    /// The requestor marked the request as urgent.
    pub urgency: bool,
    /// The requestor asked for a human to look at it.
    pub human_requested: bool,
    /// The requestor is a VIP.
    pub vip: bool,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    requestor: String,
    confidence: Confidence,
    priority: Priority,
    flags: TaskFlags,
}

impl NewTask {
    /// Creates task input with the required fields and medium priority.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        requestor: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            title: title.into(),
            requestor: requestor.into(),
            confidence,
            priority: Priority::default(),
            flags: TaskFlags::default(),
        }
    }

    /// Sets the display priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the routing hint flags.
    #[must_use]
    pub fn with_flags(mut self, flags: TaskFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Task aggregate root.
///
/// Deserialization goes through [`Task::from_persisted`], so stored JSON
/// with contradictory sent fields is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    title: String,
    requestor: String,
    status: TaskStatus,
    confidence: Confidence,
    priority: Priority,
    flags: TaskFlags,
    sent_status: Option<SentStatus>,
    sent_at: Option<DateTime<Utc>>,
    requestor_feedback: Option<RequestorFeedback>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task from stored data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored requestor name.
    pub requestor: String,
    /// Stored lifecycle status.
    pub status: TaskStatus,
    /// Stored confidence score.
    pub confidence: Confidence,
    /// Stored display priority.
    pub priority: Priority,
    /// Stored routing hints.
    pub flags: TaskFlags,
    /// Stored requestor-side progress.
    pub sent_status: Option<SentStatus>,
    /// Stored delivery timestamp.
    pub sent_at: Option<DateTime<Utc>>,
    /// Stored requestor verdict.
    pub requestor_feedback: Option<RequestorFeedback>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the first pipeline stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyRequestor`] when either field is blank.
    pub fn create(input: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = non_blank(input.title, TaskDomainError::EmptyTitle)?;
        let requestor = non_blank(input.requestor, TaskDomainError::EmptyRequestor)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title,
            requestor,
            status: TaskStatus::Ingesting,
            confidence: input.confidence,
            priority: input.priority,
            flags: input.flags,
            sent_status: None,
            sent_at: None,
            requestor_feedback: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from stored data.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentSentState`] when the sent
    /// fields contradict the status: pipeline and review tasks carry neither
    /// field, sent tasks carry both, and completed tasks keep at most the
    /// delivery timestamp. Blank titles or requestors are rejected as in
    /// [`Task::create`].
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let consistent = match data.status {
            TaskStatus::Sent => data.sent_status.is_some() && data.sent_at.is_some(),
            TaskStatus::Approved | TaskStatus::Learning => data.sent_status.is_none(),
            _ => data.sent_status.is_none() && data.sent_at.is_none(),
        };
        if !consistent {
            return Err(TaskDomainError::InconsistentSentState(data.id));
        }

        Ok(Self {
            id: data.id,
            title: non_blank(data.title, TaskDomainError::EmptyTitle)?,
            requestor: non_blank(data.requestor, TaskDomainError::EmptyRequestor)?,
            status: data.status,
            confidence: data.confidence,
            priority: data.priority,
            flags: data.flags,
            sent_status: data.sent_status,
            sent_at: data.sent_at,
            requestor_feedback: data.requestor_feedback,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the requestor name.
    #[must_use]
    pub fn requestor(&self) -> &str {
        &self.requestor
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the confidence score.
    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns the display priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the routing hint flags.
    #[must_use]
    pub const fn flags(&self) -> TaskFlags {
        self.flags
    }

    /// Returns the requestor-side progress while the task is sent.
    #[must_use]
    pub const fn sent_status(&self) -> Option<SentStatus> {
        self.sent_status
    }

    /// Returns when the task was last delivered to the requestor.
    #[must_use]
    pub const fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    /// Returns the requestor verdict, if one was recorded.
    #[must_use]
    pub const fn requestor_feedback(&self) -> Option<RequestorFeedback> {
        self.requestor_feedback
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns how long the task has been waiting on the requestor.
    #[must_use]
    pub fn time_since_sent(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.sent_at.map(|sent_at| now - sent_at)
    }

    /// Moves a pipeline task forward by exactly one step of `order`.
    ///
    /// At the end of `order` the task resolves to `Review` when its
    /// confidence is below `threshold`, otherwise to `Sent`. Returns the new
    /// status, or `None` when the task is not in a pipeline stage.
    pub(crate) fn advance_stage(
        &mut self,
        order: &[TaskStatus],
        threshold: Confidence,
        now: DateTime<Utc>,
    ) -> Option<TaskStatus> {
        if !self.status.is_pipeline_stage() {
            return None;
        }

        match self.status.next_in(order) {
            Some(next) => self.status = next,
            None if self.confidence.is_below(threshold) => self.status = TaskStatus::Review,
            None => self.mark_sent(now),
        }
        self.updated_at = now;
        Some(self.status)
    }

    /// Delivers the task to its requestor.
    pub(crate) fn mark_sent(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Sent;
        self.sent_status = Some(SentStatus::Pending);
        self.sent_at = Some(now);
        self.requestor_feedback = None;
        self.updated_at = now;
    }

    /// Records that the requestor opened the delivery.
    pub(crate) fn mark_viewed(&mut self, now: DateTime<Utc>) {
        self.sent_status = Some(SentStatus::Viewed);
        self.updated_at = now;
    }

    /// Completes a sent task after the wait period with positive feedback.
    ///
    /// The delivery timestamp is kept for display.
    pub(crate) fn approve_after_wait(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Approved;
        self.sent_status = None;
        self.requestor_feedback = Some(RequestorFeedback::Positive);
        self.updated_at = now;
    }

    /// Sends a task back to review after negative requestor feedback.
    pub(crate) fn regress_to_review(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Review;
        self.sent_status = None;
        self.sent_at = None;
        self.requestor_feedback = Some(RequestorFeedback::Negative);
        self.updated_at = now;
    }

    /// Completes the task immediately, bypassing pipeline and sent states.
    pub(crate) fn force_approve(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Approved;
        self.sent_status = None;
        self.updated_at = now;
    }

    /// Moves an approved task into `Learning`.
    pub(crate) fn begin_learning(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Learning;
        self.updated_at = now;
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn non_blank(value: String, error: TaskDomainError) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
