//! Then steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use eyre::WrapErr;
use flowboard::board::{
    domain::{NoticeLevel, TaskStatus},
    services::WorkflowError,
};
use rstest_bdd_macros::then;

#[then(r#"the task "{title}" is in "{status}""#)]
fn task_is_in(world: &TaskBoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str()).wrap_err("parse expected status")?;
    let actual = world.board_status(&title)?;
    eyre::ensure!(
        actual == expected,
        "expected {title} in {expected}, found {actual}"
    );
    Ok(())
}

fn last_notice_is(
    world: &TaskBoardWorld,
    level: NoticeLevel,
    message: &str,
) -> Result<(), eyre::Report> {
    let notice = world
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("no notice was raised"))?;
    eyre::ensure!(
        notice.level == level && notice.message == message,
        "expected {level:?} notice {message:?}, got {notice:?}"
    );
    Ok(())
}

#[then(r#"an error notice "{message}" is shown"#)]
fn error_notice_shown(world: &TaskBoardWorld, message: String) -> Result<(), eyre::Report> {
    last_notice_is(world, NoticeLevel::Error, &message)
}

#[then(r#"a success notice "{message}" is shown"#)]
fn success_notice_shown(world: &TaskBoardWorld, message: String) -> Result<(), eyre::Report> {
    last_notice_is(world, NoticeLevel::Success, &message)
}

#[then("the move is refused")]
fn move_refused(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(WorkflowError::NotPermitted(_))) {
        return Err(eyre::eyre!("expected NotPermitted error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the "{status}" column count is {count:usize}"#)]
fn column_count_is(
    world: &TaskBoardWorld,
    status: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str())
        .wrap_err("parse scenario column")?
        .column()
        .ok_or_else(|| eyre::eyre!("{status} is not a board column"))?;
    let actual = world.service.with_board(|board| {
        board
            .columns(&world.query)
            .into_iter()
            .find(|view| view.column == column)
            .map(|view| view.count())
    });
    eyre::ensure!(
        actual == Some(count),
        "expected {count} tasks in {status}, found {actual:?}"
    );
    Ok(())
}
