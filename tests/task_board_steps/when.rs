//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use eyre::WrapErr;
use flowboard::board::domain::{SearchQuery, TaskStatus};
use rstest_bdd_macros::when;

#[when(r#"the team member drops "{title}" into "{status}""#)]
fn member_drops_task(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let column = TaskStatus::try_from(status.as_str())
        .wrap_err("parse scenario column")?
        .column()
        .ok_or_else(|| eyre::eyre!("{status} is not a board column"))?;
    let result = run_async(
        world
            .service
            .drop_task(&TaskBoardWorld::member(), id, column),
    );
    world.last_move = Some(result);
    Ok(())
}

#[when(r#"the board is searched for "{text}""#)]
fn board_searched(world: &mut TaskBoardWorld, text: String) {
    world.query = SearchQuery::new(&text);
}
