//! Then steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use reviewdesk::task::domain::{RequestorFeedback, SentStatus, Task, TaskStatus};
use rstest_bdd_macros::then;

fn task_under_test(world: &LifecycleWorld) -> Result<&Task, eyre::Report> {
    let id = world.task_id()?;
    world
        .engine
        .task(id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from engine"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let task = task_under_test(world)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the task is pending with a sent timestamp")]
fn task_pending_with_timestamp(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let task = task_under_test(world)?;
    eyre::ensure!(task.sent_status() == Some(SentStatus::Pending));
    eyre::ensure!(task.sent_at().is_some());
    Ok(())
}

#[then(r#"the requestor feedback is "{feedback}""#)]
fn requestor_feedback_is(world: &LifecycleWorld, feedback: String) -> Result<(), eyre::Report> {
    let expected = match feedback.as_str() {
        "positive" => RequestorFeedback::Positive,
        "negative" => RequestorFeedback::Negative,
        other => return Err(eyre::eyre!("unknown feedback in scenario: {other}")),
    };
    let task = task_under_test(world)?;
    eyre::ensure!(task.requestor_feedback() == Some(expected));
    Ok(())
}

#[then("exactly {count:u64} completion notification was fired")]
fn completion_notifications(world: &LifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let fired = u64::try_from(world.notifier.count_for(id))?;
    eyre::ensure!(fired == count, "expected {count} notifications, saw {fired}");
    Ok(())
}

#[then("the engine holds {count:u64} task")]
fn engine_holds(world: &LifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let held = u64::try_from(world.engine.tasks().len())?;
    eyre::ensure!(held == count, "expected {count} tasks, found {held}");
    Ok(())
}
