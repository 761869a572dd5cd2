//! Background task that turns completion notifications into knowledge.

use crate::knowledge::domain::{KnowledgeGraph, NodeId};
use crate::task::{
    domain::Task,
    ports::{CompletionNotifier, RandomSource},
    services::LifecycleEngine,
};
use mockable::Clock;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Knowledge graph shared between the recorder and the host.
pub type SharedKnowledgeGraph = Arc<Mutex<KnowledgeGraph>>;

/// Appends one fact per completed task received on `completions`.
///
/// The task ends once every sender has been dropped and the channel is
/// drained.
pub fn spawn_completion_recorder<R>(
    mut completions: mpsc::UnboundedReceiver<Task>,
    graph: SharedKnowledgeGraph,
    mut random: R,
) -> JoinHandle<()>
where
    R: RandomSource + 'static,
{
    tokio::spawn(async move {
        while let Some(task) = completions.recv().await {
            record(&graph, &task, &mut random).await;
        }
        debug!("completion channel closed; recorder exiting");
    })
}

/// Like [`spawn_completion_recorder`], and also moves each recorded task
/// into `learning` on `engine`.
///
/// The engine is held weakly because it owns the notifier feeding
/// `completions`; once the host drops the engine the channel closes and
/// the recorder drains the remaining completions before exiting.
pub fn spawn_learning_recorder<R, C, ER, N>(
    mut completions: mpsc::UnboundedReceiver<Task>,
    graph: SharedKnowledgeGraph,
    mut random: R,
    engine: Weak<Mutex<LifecycleEngine<C, ER, N>>>,
) -> JoinHandle<()>
where
    R: RandomSource + 'static,
    C: Clock + Send + Sync + 'static,
    ER: RandomSource + 'static,
    N: CompletionNotifier + 'static,
{
    tokio::spawn(async move {
        while let Some(task) = completions.recv().await {
            record(&graph, &task, &mut random).await;
            if let Some(engine) = engine.upgrade() {
                engine.lock().await.begin_learning(task.id());
            }
        }
        debug!("completion channel closed; learning recorder exiting");
    })
}

async fn record<R>(graph: &SharedKnowledgeGraph, task: &Task, random: &mut R) -> NodeId
where
    R: RandomSource,
{
    let mut guard = graph.lock().await;
    let node_id = guard.record_completion(task, random);
    info!(
        task_id = %task.id(),
        node_id = %node_id,
        nodes = guard.len(),
        "knowledge recorded from completed task"
    );
    node_id
}
