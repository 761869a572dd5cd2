//! Templates that synthetic workload is generated from.

use super::{Confidence, NewTask, Priority, TaskDomainError, TaskFlags};
use serde::{Deserialize, Serialize};

/// Blueprint for an injected task.
///
/// Templates arrive from loosely structured pools, so fields are kept raw
/// and validated when a task is synthesized from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    /// Title shared by every task built from this template.
    #[serde(default)]
    pub title: String,
    /// Name of the requesting party.
    #[serde(default)]
    pub requestor: String,
    /// Display priority.
    #[serde(default)]
    pub priority: Priority,
    /// Routing hints.
    #[serde(default)]
    pub flags: TaskFlags,
    /// Fixed confidence; a random score is drawn when absent.
    #[serde(default)]
    pub confidence: Option<u8>,
}

impl TaskTemplate {
    /// Creates a template with medium priority and no fixed confidence.
    #[must_use]
    pub fn new(title: impl Into<String>, requestor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            requestor: requestor.into(),
            priority: Priority::default(),
            flags: TaskFlags::default(),
            confidence: None,
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

    /// Pins the confidence of every task built from this template.
    #[must_use]
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Title with surrounding whitespace removed, used as the template key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.title.trim()
    }

    /// Checks that a task can be built from this template.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] found among a blank title, a
    /// blank requestor, or an out-of-range fixed confidence.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if self.requestor.trim().is_empty() {
            return Err(TaskDomainError::EmptyRequestor);
        }
        if let Some(value) = self.confidence {
            Confidence::new(value)?;
        }
        Ok(())
    }

    /// Builds task input, using the fixed confidence when present and
    /// `fallback` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidConfidence`] when the fixed
    /// confidence is out of range.
    pub fn to_new_task(&self, fallback: Confidence) -> Result<NewTask, TaskDomainError> {
        let confidence = self.confidence.map_or(Ok(fallback), Confidence::new)?;
        Ok(NewTask::new(self.title.clone(), self.requestor.clone(), confidence)
            .with_priority(self.priority)
            .with_flags(self.flags))
    }
}
