//! Task status, sent-state, feedback, and priority enumerations.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The first six variants are pipeline stages, in processing order. The
/// remaining variants are the outcome, waiting, and terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Raw request is being ingested.
    Ingesting,
    /// Assertions about the request are being extracted.
    Asserting,
    /// An analysis plan is being drafted.
    Planning,
    /// The analysis is being built.
    Building,
    /// The result is being validated.
    Validating,
    /// The deliverable is being generated.
    Generating,
    /// A human expert must inspect the task.
    Review,
    /// The output was delivered and awaits the requestor's response.
    Sent,
    /// The task is complete.
    Approved,
    /// The completed task is feeding the knowledge graph.
    Learning,
}

impl TaskStatus {
    /// Pipeline stages in processing order.
    pub const PIPELINE: [Self; 6] = [
        Self::Ingesting,
        Self::Asserting,
        Self::Planning,
        Self::Building,
        Self::Validating,
        Self::Generating,
    ];

    /// Stages walked by default. `Validating` is the last one; a task found
    /// in `Generating` resolves on its next tick.
    pub const STAGE_ORDER: [Self; 5] = [
        Self::Ingesting,
        Self::Asserting,
        Self::Planning,
        Self::Building,
        Self::Validating,
    ];

    /// Every status a task can hold.
    pub const ALL: [Self; 10] = [
        Self::Ingesting,
        Self::Asserting,
        Self::Planning,
        Self::Building,
        Self::Validating,
        Self::Generating,
        Self::Review,
        Self::Sent,
        Self::Approved,
        Self::Learning,
    ];

    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingesting => "ingesting",
            Self::Asserting => "asserting",
            Self::Planning => "planning",
            Self::Building => "building",
            Self::Validating => "validating",
            Self::Generating => "generating",
            Self::Review => "review",
            Self::Sent => "sent",
            Self::Approved => "approved",
            Self::Learning => "learning",
        }
    }

    /// Returns `true` for the six pipeline stages.
    #[must_use]
    pub const fn is_pipeline_stage(self) -> bool {
        matches!(
            self,
            Self::Ingesting
                | Self::Asserting
                | Self::Planning
                | Self::Building
                | Self::Validating
                | Self::Generating
        )
    }

    /// Returns the stage that follows this one in `order`, or `None` when
    /// the next tick resolves the outcome instead.
    ///
    /// The last stage of `order` resolves, as does any status missing from
    /// it.
    #[must_use]
    pub fn next_in(self, order: &[Self]) -> Option<Self> {
        let position = order.iter().position(|stage| *stage == self)?;
        order.get(position + 1).copied()
    }

    /// Returns `true` for statuses shown in the incoming queue: pipeline
    /// stages and `Review`.
    #[must_use]
    pub const fn is_incoming(self) -> bool {
        self.is_pipeline_stage() || matches!(self, Self::Review)
    }

    /// Returns `true` for statuses the engine never leaves on its own.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Learning)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requestor-side progress of a sent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentStatus {
    /// Delivered but not yet opened.
    Pending,
    /// Opened by the requestor.
    Viewed,
    /// The requestor has been asked a follow-up question.
    AwaitingResponse,
}

/// Simulated requestor verdict on a sent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestorFeedback {
    /// The requestor accepted the output.
    Positive,
    /// The requestor rejected the output.
    Negative,
}

/// Display priority, ordered from `Low` to `High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Background work.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Shown first.
    High,
}

impl Priority {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
