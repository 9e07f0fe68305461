//! Given steps for task board BDD scenarios.

use super::world::{MEMBER, MEMBER_NAME, PROJECT, TaskBoardWorld, run_async};
use eyre::WrapErr;
use flowboard::board::domain::{Assignee, Task, TaskId, TaskStatus};
use rstest_bdd_macros::given;

fn seed_task(
    world: &mut TaskBoardWorld,
    title: String,
    status: &str,
    assignee: Option<Assignee>,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status).wrap_err("parse scenario status")?;
    let next = i64::try_from(world.task_ids.len()).wrap_err("scenario task count")? + 1;
    let id = TaskId::new(next);
    let mut task = Task::new(id, PROJECT, title.as_str())
        .wrap_err("build scenario task")?
        .with_status(parsed);
    if let Some(who) = assignee {
        task = task.with_assignee(who);
    }
    world.backend.insert_task(task);
    world.task_ids.insert(title, id);
    Ok(())
}

#[given(r#"a task "{title}" in "{status}" assigned to the team member"#)]
fn assigned_task(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    seed_task(world, title, &status, Some(Assignee::new(MEMBER, MEMBER_NAME)))
}

#[given(r#"an unassigned task "{title}" in "{status}""#)]
fn unassigned_task(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    seed_task(world, title, &status, None)
}

#[given("the board is loaded")]
fn board_loaded(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    run_async(world.service.load()).wrap_err("load scenario board")
}

#[given("the backend will fail the next status update")]
fn backend_fails_next_status_update(world: &mut TaskBoardWorld) {
    world.backend.fail_next_status_updates(1);
}
