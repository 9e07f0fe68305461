//! Behaviour tests for the task board workflow.

#[path = "task_board_steps/mod.rs"]
mod task_board_steps_defs;

use rstest_bdd_macros::scenario;
use task_board_steps_defs::world::{TaskBoardWorld, world};

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A failed drop reverts to the backend status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_drop_reverts(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A successful drop is confirmed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn successful_drop_confirmed(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "A team member cannot move someone else's task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn member_cannot_move_others_task(world: TaskBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_board.feature",
    name = "Searching narrows the column counts"
)]
#[tokio::test(flavor = "multi_thread")]
async fn search_narrows_column_counts(world: TaskBoardWorld) {
    let _ = world;
}
