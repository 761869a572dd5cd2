//! Tests for engine configuration loading and validation.

use crate::task::domain::TaskStatus;
use crate::task::services::{EngineConfig, EngineConfigError};
use eyre::{bail, ensure};
use rstest::rstest;
use std::time::Duration;

#[rstest]
fn defaults_match_simulation_constants() -> eyre::Result<()> {
    let config = EngineConfig::default();
    config.validate()?;
    ensure!(config.confidence_threshold == 80);
    ensure!(config.wait_period_ms == 30_000);
    ensure!(config.viewed_delay_min_ms == 5_000 && config.viewed_delay_max_ms == 10_000);
    ensure!(config.injection_interval_min_ms == 8_000);
    ensure!(config.injection_interval_max_ms == 15_000);
    ensure!(config.stage_tick() == Duration::from_secs(3));
    Ok(())
}

#[rstest]
fn partial_json_overrides_only_named_fields() -> eyre::Result<()> {
    let config = EngineConfig::from_json_str(r#"{"confidence_threshold": 70, "wait_period_ms": 500}"#)?;
    ensure!(config.confidence_threshold == 70);
    ensure!(config.wait_period_ms == 500);
    ensure!(config.feedback_tick_ms == EngineConfig::default().feedback_tick_ms);
    Ok(())
}

#[rstest]
fn malformed_json_is_reported() -> eyre::Result<()> {
    match EngineConfig::from_json_str("{ not json") {
        Err(EngineConfigError::Json(_)) => Ok(()),
        other => bail!("expected a JSON error, got {other:?}"),
    }
}

#[rstest]
#[case(EngineConfig { confidence_threshold: 101, ..EngineConfig::default() })]
#[case(EngineConfig { viewed_delay_min_ms: 11_000, ..EngineConfig::default() })]
#[case(EngineConfig { injection_interval_max_ms: 1_000, ..EngineConfig::default() })]
#[case(EngineConfig { generated_confidence_max: 120, ..EngineConfig::default() })]
#[case(EngineConfig { generated_confidence_min: 99, generated_confidence_max: 10, ..EngineConfig::default() })]
#[case(EngineConfig { regression_probability: 1.5, ..EngineConfig::default() })]
#[case(EngineConfig { regression_probability: f64::NAN, ..EngineConfig::default() })]
#[case(EngineConfig { stage_tick_ms: 0, ..EngineConfig::default() })]
#[case(EngineConfig { feedback_tick_ms: 0, ..EngineConfig::default() })]
#[case(EngineConfig { stage_order: Vec::new(), ..EngineConfig::default() })]
#[case(EngineConfig { stage_order: vec![TaskStatus::Ingesting, TaskStatus::Review], ..EngineConfig::default() })]
#[case(EngineConfig { stage_order: vec![TaskStatus::Ingesting, TaskStatus::Planning, TaskStatus::Ingesting], ..EngineConfig::default() })]
fn invalid_configurations_are_rejected(#[case] config: EngineConfig) {
    assert!(config.validate().is_err(), "{config:?} should be rejected");
}

#[rstest]
fn equal_bounds_are_allowed() -> eyre::Result<()> {
    let config = EngineConfig {
        viewed_delay_min_ms: 7_000,
        viewed_delay_max_ms: 7_000,
        generated_confidence_min: 90,
        generated_confidence_max: 90,
        ..EngineConfig::default()
    };
    config.validate()?;
    Ok(())
}

#[rstest]
fn inverted_range_names_the_field() {
    let config = EngineConfig {
        viewed_delay_min_ms: 11_000,
        ..EngineConfig::default()
    };
    let message = config
        .validate()
        .err()
        .map(|err| err.to_string())
        .unwrap_or_default();
    assert!(message.contains("viewed delay"), "{message}");
}

#[rstest]
fn stage_order_can_be_overridden_from_json() -> eyre::Result<()> {
    let config = EngineConfig::from_json_str(
        r#"{"stage_order": ["ingesting", "validating", "generating"]}"#,
    )?;
    ensure!(
        config.stage_order
            == [TaskStatus::Ingesting, TaskStatus::Validating, TaskStatus::Generating]
    );
    ensure!(EngineConfig::default().stage_order == TaskStatus::STAGE_ORDER);
    Ok(())
}

#[rstest]
fn duplicate_stage_is_named_in_the_error() -> eyre::Result<()> {
    let config = EngineConfig {
        stage_order: vec![TaskStatus::Planning, TaskStatus::Planning],
        ..EngineConfig::default()
    };
    match config.validate() {
        Err(EngineConfigError::DuplicateStage(TaskStatus::Planning)) => Ok(()),
        other => bail!("expected a duplicate stage error, got {other:?}"),
    }
}
