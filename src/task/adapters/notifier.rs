//! Completion notifier adapters.

use crate::task::{domain::Task, ports::CompletionNotifier};
use tokio::sync::mpsc;
use tracing::debug;

/// Forwards completed task snapshots over an unbounded channel.
///
/// Sending never blocks, and the receiver handles each snapshot on its own
/// scheduling turn after the engine has released the collection.
#[derive(Debug, Clone)]
pub struct ChannelCompletionNotifier {
    sender: mpsc::UnboundedSender<Task>,
}

impl ChannelCompletionNotifier {
    /// Creates a notifier and the receiver its snapshots arrive on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Task>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CompletionNotifier for ChannelCompletionNotifier {
    fn task_completed(&self, task: &Task) {
        if self.sender.send(task.clone()).is_err() {
            debug!(task_id = %task.id(), "completion receiver dropped; notification discarded");
        }
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompletionNotifier;

impl CompletionNotifier for NoopCompletionNotifier {
    fn task_completed(&self, _task: &Task) {}
}
