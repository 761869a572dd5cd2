//! Runs the review desk simulation until interrupted.
//!
//! Usage:
//!
//! ```text
//! control_center [--config <path>] [--templates <path>] [--seed <u64>]
//! ```
//!
//! `--config` points at a JSON [`EngineConfig`] document; omitted fields keep
//! their defaults. `--templates` points at a JSON array of task templates; the
//! built-in analytics pool is used when absent. `--seed` makes the simulated
//! workload reproducible. A representative configuration is:
//!
//! ```json
//! {
//!   "confidence_threshold": 80,
//!   "wait_period_ms": 30000,
//!   "stage_tick_ms": 3000
//! }
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use mockable::DefaultClock;
use reviewdesk::knowledge::{domain::KnowledgeGraph, services::spawn_learning_recorder};
use reviewdesk::task::{
    adapters::{
        ChannelCompletionNotifier, SeededRandom, TemplatePoolError, default_templates,
        parse_template_pool,
    },
    domain::TaskTemplate,
    services::{
        DriverError, EngineConfig, EngineConfigError, EngineDriver, LifecycleEngine, TaskBoard,
        status_counts,
    },
};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running the simulation.
#[derive(Debug, Error)]
enum ControlCenterError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] EngineConfigError),
    #[error(transparent)]
    Templates(#[from] TemplatePoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to wait for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("knowledge recorder failed: {0}")]
    Recorder(#[source] tokio::task::JoinError),
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    templates: Option<PathBuf>,
    seed: Option<u64>,
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args(env::args().skip(1))?;
    run(args).map_err(Into::into)
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args, ControlCenterError> {
    let mut args = Args::default();
    let mut raw = raw;
    while let Some(flag) = raw.next() {
        let value = raw
            .next()
            .ok_or_else(|| ControlCenterError::InvalidArgs(format!("{flag} requires a value")))?;
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value)),
            "--templates" => args.templates = Some(PathBuf::from(value)),
            "--seed" => {
                let seed = value.parse().map_err(|_| {
                    ControlCenterError::InvalidArgs(format!("seed '{value}' is not a u64"))
                })?;
                args.seed = Some(seed);
            }
            other => {
                return Err(ControlCenterError::InvalidArgs(format!(
                    "unknown flag '{other}'; expected --config, --templates, or --seed"
                )));
            }
        }
    }
    Ok(args)
}

fn read(path: &Path) -> Result<String, ControlCenterError> {
    std::fs::read_to_string(path).map_err(|source| ControlCenterError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(args: &Args) -> Result<EngineConfig, ControlCenterError> {
    match &args.config {
        Some(path) => Ok(EngineConfig::from_json_str(&read(path)?)?),
        None => Ok(EngineConfig::default()),
    }
}

fn load_templates(args: &Args) -> Result<Vec<TaskTemplate>, ControlCenterError> {
    match &args.templates {
        Some(path) => Ok(parse_template_pool(&read(path)?)?),
        None => Ok(default_templates()),
    }
}

fn random_source(seed: Option<u64>) -> SeededRandom {
    seed.map_or_else(SeededRandom::from_entropy, SeededRandom::from_seed)
}

fn run(args: Args) -> Result<(), ControlCenterError> {
    let config = load_config(&args)?;
    let pool = load_templates(&args)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ControlCenterError::RuntimeInit)?;

    runtime.block_on(async {
        let (notifier, completions) = ChannelCompletionNotifier::channel();
        let engine = Arc::new(Mutex::new(LifecycleEngine::new(
            config,
            Arc::new(DefaultClock),
            random_source(args.seed),
            Arc::new(notifier),
        )?));
        let graph = Arc::new(Mutex::new(KnowledgeGraph::new()));
        let recorder = spawn_learning_recorder(
            completions,
            Arc::clone(&graph),
            random_source(args.seed.map(|seed| seed.wrapping_add(1))),
            Arc::downgrade(&engine),
        );

        let driver = EngineDriver::start(Arc::clone(&engine), pool).await;
        info!("review desk running; press Ctrl-C to stop");
        tokio::signal::ctrl_c()
            .await
            .map_err(ControlCenterError::Signal)?;
        driver.stop().await?;

        let tasks = engine.lock().await.tasks().to_vec();
        // The recorder only holds the engine weakly, so this closes the
        // completion channel and lets it drain what is still queued.
        drop(engine);
        recorder.await.map_err(ControlCenterError::Recorder)?;

        let knowledge_nodes = graph.lock().await.len();
        let board = TaskBoard::from_tasks(&tasks);
        for (status, count) in status_counts(&tasks) {
            info!(status = %status, count, "final task count");
        }
        info!(
            incoming = board.incoming.len(),
            sent = board.sent.len(),
            completed = board.completed.len(),
            knowledge_nodes,
            "review desk stopped"
        );
        Ok::<(), ControlCenterError>(())
    })
}
