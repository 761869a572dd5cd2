//! Selection policy for the incoming queue.

use crate::task::domain::{Task, TaskId};

/// Returns the task that should be selected in the incoming queue.
///
/// Keeps `current` while it still refers to an incoming task (a pipeline
/// stage or `review`). Otherwise falls back to the first incoming task in
/// collection order, or `None` when the queue is empty.
#[must_use]
pub fn reconcile_selection(tasks: &[Task], current: Option<TaskId>) -> Option<TaskId> {
    let still_incoming = current.filter(|id| {
        tasks
            .iter()
            .any(|task| task.id() == *id && task.status().is_incoming())
    });

    still_incoming.or_else(|| {
        tasks
            .iter()
            .find(|task| task.status().is_incoming())
            .map(Task::id)
    })
}
