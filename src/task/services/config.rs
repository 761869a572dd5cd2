//! Tunable parameters of the lifecycle engine.

use crate::task::domain::{Confidence, TaskStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Engine configuration.
///
/// Every field has a default, so a partial JSON document only overrides the
/// values it names. Millisecond ranges are half-open: a draw lands in
/// `[min, max)`, or exactly on `min` when both bounds are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tasks scoring below this are routed to expert review.
    pub confidence_threshold: u8,
    /// How long a sent task waits before the requestor approves it.
    pub wait_period_ms: u64,
    /// Lower bound of the delay before a sent task is marked viewed.
    pub viewed_delay_min_ms: u64,
    /// Upper bound of the delay before a sent task is marked viewed.
    pub viewed_delay_max_ms: u64,
    /// Chance per feedback tick that a viewed task is rejected.
    pub regression_probability: f64,
    /// Lower bound of the pause between injected tasks.
    pub injection_interval_min_ms: u64,
    /// Upper bound of the pause between injected tasks.
    pub injection_interval_max_ms: u64,
    /// Lowest confidence drawn for templates without a fixed score.
    pub generated_confidence_min: u8,
    /// Highest confidence drawn for templates without a fixed score,
    /// inclusive.
    pub generated_confidence_max: u8,
    /// Period of the stage-advance driver.
    pub stage_tick_ms: u64,
    /// Period of the feedback-simulation driver.
    pub feedback_tick_ms: u64,
    /// Pipeline stages in the order tasks walk them. A task leaving the
    /// last stage, or sitting in a stage not listed, resolves its outcome.
    pub stage_order: Vec<TaskStatus>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 80,
            wait_period_ms: 30_000,
            viewed_delay_min_ms: 5_000,
            viewed_delay_max_ms: 10_000,
            regression_probability: 0.02,
            injection_interval_min_ms: 8_000,
            injection_interval_max_ms: 15_000,
            generated_confidence_min: 55,
            generated_confidence_max: 99,
            stage_tick_ms: 3_000,
            feedback_tick_ms: 1_000,
            stage_order: TaskStatus::STAGE_ORDER.to_vec(),
        }
    }
}

/// Errors returned while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum EngineConfigError {
    /// The threshold is not a valid confidence score.
    #[error("confidence threshold {0} exceeds 100")]
    ThresholdOutOfRange(u8),

    /// A range has its lower bound above its upper bound.
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        /// Configuration range that failed validation.
        name: &'static str,
        /// Configured lower bound.
        min: u64,
        /// Configured upper bound.
        max: u64,
    },

    /// The generated confidence bounds are not valid scores.
    #[error("generated confidence bound {0} exceeds 100")]
    GeneratedConfidenceOutOfRange(u8),

    /// The regression probability is not within `[0, 1]`.
    #[error("regression probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// The stage order lists no stages.
    #[error("stage order is empty")]
    EmptyStageOrder,

    /// The stage order names a status outside the pipeline.
    #[error("{0} is not a pipeline stage")]
    NotAPipelineStage(TaskStatus),

    /// The stage order lists a stage twice.
    #[error("stage {0} appears more than once in the stage order")]
    DuplicateStage(TaskStatus),

    /// A driver period is zero.
    #[error("{0} must be greater than zero")]
    ZeroPeriod(&'static str),

    /// The configuration document could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError::Json`] for malformed documents and any
    /// error reported by [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, EngineConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field for consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineConfigError`] found.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        self.threshold()?;
        ensure_ordered(
            "viewed delay",
            self.viewed_delay_min_ms,
            self.viewed_delay_max_ms,
        )?;
        ensure_ordered(
            "injection interval",
            self.injection_interval_min_ms,
            self.injection_interval_max_ms,
        )?;
        for bound in [self.generated_confidence_min, self.generated_confidence_max] {
            if bound > Confidence::MAX {
                return Err(EngineConfigError::GeneratedConfidenceOutOfRange(bound));
            }
        }
        ensure_ordered(
            "generated confidence",
            u64::from(self.generated_confidence_min),
            u64::from(self.generated_confidence_max),
        )?;
        if !(0.0..=1.0).contains(&self.regression_probability) {
            return Err(EngineConfigError::InvalidProbability(
                self.regression_probability,
            ));
        }
        if self.stage_tick_ms == 0 {
            return Err(EngineConfigError::ZeroPeriod("stage tick"));
        }
        if self.feedback_tick_ms == 0 {
            return Err(EngineConfigError::ZeroPeriod("feedback tick"));
        }
        self.validate_stage_order()
    }

    fn validate_stage_order(&self) -> Result<(), EngineConfigError> {
        if self.stage_order.is_empty() {
            return Err(EngineConfigError::EmptyStageOrder);
        }
        for (index, stage) in self.stage_order.iter().enumerate() {
            if !stage.is_pipeline_stage() {
                return Err(EngineConfigError::NotAPipelineStage(*stage));
            }
            if self.stage_order.iter().take(index).any(|seen| seen == stage) {
                return Err(EngineConfigError::DuplicateStage(*stage));
            }
        }
        Ok(())
    }

    /// Returns the confidence threshold as a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError::ThresholdOutOfRange`] when the threshold
    /// exceeds 100.
    pub fn threshold(&self) -> Result<Confidence, EngineConfigError> {
        Confidence::new(self.confidence_threshold)
            .map_err(|_| EngineConfigError::ThresholdOutOfRange(self.confidence_threshold))
    }

    /// Returns the stage-advance driver period.
    #[must_use]
    pub const fn stage_tick(&self) -> Duration {
        Duration::from_millis(self.stage_tick_ms)
    }

    /// Returns the feedback-simulation driver period.
    #[must_use]
    pub const fn feedback_tick(&self) -> Duration {
        Duration::from_millis(self.feedback_tick_ms)
    }
}

fn ensure_ordered(name: &'static str, min: u64, max: u64) -> Result<(), EngineConfigError> {
    if min > max {
        return Err(EngineConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}
