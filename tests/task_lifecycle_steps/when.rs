//! When steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use rstest_bdd_macros::when;

#[when("the stage tick runs")]
fn stage_tick_runs(world: &mut LifecycleWorld) {
    world.engine.advance_stage();
}

#[when("the feedback tick runs")]
fn feedback_tick_runs(world: &mut LifecycleWorld) {
    world.engine.simulate_feedback();
}

#[when("{ms:u64} milliseconds pass")]
fn time_passes(world: &mut LifecycleWorld, ms: u64) -> Result<(), eyre::Report> {
    world.clock.advance_ms(i64::try_from(ms)?);
    Ok(())
}

#[when("the task is force completed")]
fn task_force_completed(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    world.engine.force_complete(id);
    Ok(())
}

#[when("a task is injected")]
fn task_injected(world: &mut LifecycleWorld) {
    let pool = world.pool.clone();
    if let Some(task) = world.engine.inject_task(&pool) {
        world.task_id = Some(task.id());
    }
}
