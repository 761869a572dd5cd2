//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Confidence scores are percentages.
    #[error("invalid confidence {0}, expected a value between 0 and 100")]
    InvalidConfidence(u8),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The requestor name is empty after trimming.
    #[error("task requestor must not be empty")]
    EmptyRequestor,

    /// A restored task carries sent fields that disagree with its status.
    #[error("task {0} has sent fields that do not match its status")]
    InconsistentSentState(TaskId),
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
