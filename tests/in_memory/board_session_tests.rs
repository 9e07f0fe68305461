//! In-memory integration tests for board workflows behind a real session.

use super::helpers::{APOLLO, TESS, backend, board, context, sign_in, store};
use flowboard::{
    access::{adapters::memory::InMemorySessionStore, domain::RoutePath},
    board::{
        adapters::memory::InMemoryFlowBackend,
        domain::{Actor, BoardColumn, BoardScope, NewTask, SearchQuery, TaskId, TaskStatus},
        services::{OverviewService, TransitionOutcome, WorkflowError},
    },
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_plans_and_moves_work(
    store: InMemorySessionStore,
    backend: InMemoryFlowBackend,
) -> Result<(), eyre::Report> {
    let context = context(&store);
    let session = sign_in(&context, "priya").await?;
    let actor = Actor::from_session(&session);
    let (service, notifier) = board(&backend, &context, BoardScope::Project(APOLLO));
    service.load().await?;

    let created = service
        .create_task(
            &actor,
            &NewTask::new(APOLLO, "Write release notes")?.with_assignee(TESS),
        )
        .await?;
    let outcome = service
        .drop_task(&actor, created.id(), BoardColumn::Review)
        .await?;

    eyre::ensure!(outcome == TransitionOutcome::Confirmed, "move must confirm");
    let review = service.with_board(|board| {
        board
            .columns(&SearchQuery::everything())
            .into_iter()
            .find(|view| view.column == BoardColumn::Review)
            .map(|view| view.count())
    });
    eyre::ensure!(review == Some(1), "review column should hold the new task");
    eyre::ensure!(
        backend.task(created.id()).map(|task| task.status()) == Some(TaskStatus::Review),
        "backend must hold the new status"
    );
    eyre::ensure!(notifier.notices().len() == 2, "expected create and move notices");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_ends_the_session(
    store: InMemorySessionStore,
    backend: InMemoryFlowBackend,
) -> Result<(), eyre::Report> {
    let context = context(&store);
    let session = sign_in(&context, "tess").await?;
    let (service, _) = board(&backend, &context, BoardScope::Project(APOLLO));
    service.load().await?;
    backend.reject_session();

    let result = service
        .change_status(
            &Actor::from_session(&session),
            TaskId::new(1),
            TaskStatus::Review,
        )
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(WorkflowError::SessionExpired { ref redirect }) if *redirect == RoutePath::LOGIN
        ),
        "expected an expired session, got {result:?}"
    );
    eyre::ensure!(context.current().is_none(), "session must be dropped");
    eyre::ensure!(store.is_empty(), "persisted session must be cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_board_lists_only_their_work(
    store: InMemorySessionStore,
    backend: InMemoryFlowBackend,
) -> Result<(), eyre::Report> {
    let context = context(&store);
    let session = sign_in(&context, "tess").await?;
    let (service, _) = board(&backend, &context, BoardScope::MyTasks(session.user_id()));
    service.load().await?;

    let board_view = service.snapshot();
    let titles: Vec<&str> = board_view.tasks().map(|task| task.title()).collect();
    eyre::ensure!(
        titles == vec!["Implement authentication"],
        "unexpected tasks {titles:?}"
    );
    eyre::ensure!(
        board_view.visible_tasks(&SearchQuery::new("APOLLO")).len() == 1,
        "project names are searchable on the personal board"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_overview_shows_in_progress_work(
    backend: InMemoryFlowBackend,
) -> Result<(), eyre::Report> {
    let overview = OverviewService::new(Arc::new(backend)).client_overview().await?;

    eyre::ensure!(overview.total_projects == 1, "one project expected");
    eyre::ensure!(overview.active_projects == 1, "project should be active");
    let names: Vec<Option<&str>> = overview
        .tasks_in_progress
        .iter()
        .map(|task| task.project_name())
        .collect();
    eyre::ensure!(names == vec![Some("Apollo")], "unexpected tasks {names:?}");
    Ok(())
}
