//! Validated confidence scores.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage score deciding whether a task needs human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// Highest representable score.
    pub const MAX: u8 = 100;

    /// Creates a validated confidence score.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidConfidence`] when the value exceeds
    /// 100.
    pub const fn new(value: u8) -> Result<Self, TaskDomainError> {
        if value > Self::MAX {
            return Err(TaskDomainError::InvalidConfidence(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` when this score falls strictly below `threshold`.
    #[must_use]
    pub const fn is_below(self, threshold: Self) -> bool {
        self.0 < threshold.0
    }
}

impl TryFrom<u8> for Confidence {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
