//! Column view of the task collection for dashboards.

use crate::task::domain::{Task, TaskStatus};
use std::cmp::Reverse;

/// Tasks grouped into the three dashboard columns.
///
/// Each column lists high priority first, then newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    /// Pipeline and review tasks.
    pub incoming: Vec<Task>,
    /// Tasks waiting on their requestor.
    pub sent: Vec<Task>,
    /// Approved and learning tasks.
    pub completed: Vec<Task>,
}

impl TaskBoard {
    /// Builds the board from a task snapshot.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let column = match task.status() {
                TaskStatus::Sent => &mut board.sent,
                TaskStatus::Approved | TaskStatus::Learning => &mut board.completed,
                _ => &mut board.incoming,
            };
            column.push(task.clone());
        }

        for column in [&mut board.incoming, &mut board.sent, &mut board.completed] {
            column.sort_by_key(|task| (Reverse(task.priority()), Reverse(task.created_at())));
        }
        board
    }
}

/// Counts tasks per status, in [`TaskStatus::ALL`] order.
#[must_use]
pub fn status_counts(tasks: &[Task]) -> Vec<(TaskStatus, usize)> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let count = tasks.iter().filter(|task| task.status() == status).count();
            (status, count)
        })
        .collect()
}
