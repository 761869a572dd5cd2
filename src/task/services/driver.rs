//! Tokio host that ticks a shared engine on independent timers.

use super::LifecycleEngine;
use crate::task::{
    domain::TaskTemplate,
    ports::{CompletionNotifier, RandomSource},
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Engine shared between the drivers and the host.
pub type SharedEngine<C, R, N> = Arc<Mutex<LifecycleEngine<C, R, N>>>;

/// Errors returned while stopping the drivers.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A driver loop panicked or was cancelled.
    #[error("driver loop failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Handle to the three periodic drivers of a [`LifecycleEngine`].
///
/// Each tick holds the engine lock for its whole duration, so tick handlers
/// never interleave. Dropping the handle without calling [`EngineDriver::stop`]
/// also signals the loops to exit.
#[derive(Debug)]
pub struct EngineDriver {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl EngineDriver {
    /// Spawns the stage, feedback, and injection drivers on the current
    /// tokio runtime.
    ///
    /// Periods are read from the engine configuration once, at start.
    pub async fn start<C, R, N>(engine: SharedEngine<C, R, N>, pool: Vec<TaskTemplate>) -> Self
    where
        C: Clock + Send + Sync + 'static,
        R: RandomSource + 'static,
        N: CompletionNotifier + 'static,
    {
        let (stage_period, feedback_period) = {
            let guard = engine.lock().await;
            (guard.config().stage_tick(), guard.config().feedback_tick())
        };
        let (shutdown, _) = watch::channel(false);

        let handles = vec![
            tokio::spawn(run_periodic(
                "stage",
                stage_period,
                shutdown.subscribe(),
                Arc::clone(&engine),
                |engine| {
                    engine.advance_stage();
                    engine.update_selection();
                },
            )),
            tokio::spawn(run_periodic(
                "feedback",
                feedback_period,
                shutdown.subscribe(),
                Arc::clone(&engine),
                |engine| {
                    engine.simulate_feedback();
                    engine.update_selection();
                },
            )),
            tokio::spawn(run_injection(shutdown.subscribe(), engine, pool)),
        ];

        info!(
            stage_tick = ?stage_period,
            feedback_tick = ?feedback_period,
            "engine drivers started"
        );
        Self { shutdown, handles }
    }

    /// Stops all drivers and waits for them to exit.
    ///
    /// Once this returns no further ticks run.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Join`] when a driver loop panicked.
    pub async fn stop(self) -> Result<(), DriverError> {
        self.shutdown.send_replace(true);
        for handle in self.handles {
            handle.await?;
        }
        info!("engine drivers stopped");
        Ok(())
    }
}

async fn run_periodic<C, R, N, F>(
    name: &'static str,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    engine: SharedEngine<C, R, N>,
    mut tick: F,
) where
    C: Clock + Send + Sync,
    R: RandomSource,
    N: CompletionNotifier,
    F: FnMut(&mut LifecycleEngine<C, R, N>),
{
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = interval.tick() => {
                let mut guard = engine.lock().await;
                if *shutdown.borrow() {
                    break;
                }
                tick(&mut *guard);
            }
        }
    }
    debug!(driver = name, "driver exited");
}

async fn run_injection<C, R, N>(
    mut shutdown: watch::Receiver<bool>,
    engine: SharedEngine<C, R, N>,
    pool: Vec<TaskTemplate>,
) where
    C: Clock + Send + Sync,
    R: RandomSource,
    N: CompletionNotifier,
{
    loop {
        let delay = engine.lock().await.next_injection_delay();
        let stopped = wait_or_shutdown(&mut shutdown, tokio::time::sleep(delay)).await;
        if stopped {
            break;
        }

        let mut guard = engine.lock().await;
        if *shutdown.borrow() {
            break;
        }
        if let Some(task) = guard.inject_task(&pool) {
            debug!(task_id = %task.id(), "injection tick produced task");
        }
        guard.update_selection();
    }
    debug!(driver = "injection", "driver exited");
}

/// Waits for `pause`, returning `true` if shutdown was signalled first.
async fn wait_or_shutdown(
    shutdown: &mut watch::Receiver<bool>,
    pause: impl Future<Output = ()>,
) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.changed() => true,
        () = pause => false,
    }
}
