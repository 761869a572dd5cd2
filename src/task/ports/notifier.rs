//! Notification port for tasks reaching `approved`.

use crate::task::domain::Task;

/// Receives a snapshot of every task the engine completes.
///
/// The engine calls this once per completion, after the operation or tick
/// that produced it has finished mutating the collection. Implementations
/// must not block.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionNotifier: Send + Sync {
    /// Handles a completed task.
    fn task_completed(&self, task: &Task);
}
