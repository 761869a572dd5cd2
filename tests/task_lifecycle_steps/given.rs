//! Given steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use chrono::Utc;
use reviewdesk::task::domain::{
    Confidence, PersistedTaskData, Priority, Task, TaskFlags, TaskId, TaskStatus, TaskTemplate,
};
use rstest_bdd_macros::given;

#[given(r#"a task in "{status_name}" with confidence {score:u64}"#)]
fn task_in_status(
    world: &mut LifecycleWorld,
    status_name: String,
    score: u64,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status_name.as_str())?;
    let confidence = Confidence::new(u8::try_from(score)?)?;
    let now = Utc::now();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Scenario task".to_owned(),
        requestor: "Analytics".to_owned(),
        status,
        confidence,
        priority: Priority::Medium,
        flags: TaskFlags::default(),
        sent_status: None,
        sent_at: None,
        requestor_feedback: None,
        created_at: now,
        updated_at: now,
    })?;

    world.task_id = Some(task.id());
    world.engine =
        LifecycleWorld::fresh_engine(&world.clock, &world.notifier)?.with_tasks([task]);
    Ok(())
}

#[given(r#"a template pool containing only "{title}""#)]
fn single_template_pool(world: &mut LifecycleWorld, title: String) {
    world.pool = vec![TaskTemplate::new(title, "Customer Success")];
}
