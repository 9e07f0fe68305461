//! Cross-project overview for client accounts.

use crate::board::{
    domain::{Project, ProjectId, Task, TaskStatus},
    ports::{GatewayResult, ProjectGateway, TaskGateway},
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregate shown on the client overview page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOverview {
    /// Number of projects visible to the user.
    pub total_projects: usize,
    /// Number of active projects.
    pub active_projects: usize,
    /// In-progress tasks across all projects, annotated with project names.
    pub tasks_in_progress: Vec<Task>,
    /// Projects whose tasks could not be fetched.
    pub failed_projects: Vec<ProjectId>,
}

/// Builds the client overview from per-project task listings.
#[derive(Debug, Clone)]
pub struct OverviewService<G>
where
    G: TaskGateway + ProjectGateway,
{
    gateway: Arc<G>,
}

impl<G> OverviewService<G>
where
    G: TaskGateway + ProjectGateway,
{
    /// Creates an overview service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists projects and fetches their tasks concurrently.
    ///
    /// A project whose listing fails is logged and reported in
    /// [`ClientOverview::failed_projects`]; the others still count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::board::ports::GatewayError`] when the project list
    /// itself cannot be fetched.
    pub async fn client_overview(&self) -> GatewayResult<ClientOverview> {
        let projects = self.gateway.list_projects().await?;
        let listings = join_all(projects.iter().map(|project| self.project_tasks(project))).await;

        let mut overview = ClientOverview {
            total_projects: projects.len(),
            active_projects: projects.iter().filter(|project| project.is_active()).count(),
            ..ClientOverview::default()
        };
        for (project, listing) in projects.iter().zip(listings) {
            match listing {
                Ok(tasks) => overview.tasks_in_progress.extend(tasks),
                Err(err) => {
                    warn!(project_id = %project.id(), error = %err, "project tasks unavailable");
                    overview.failed_projects.push(project.id());
                }
            }
        }
        info!(
            projects = overview.total_projects,
            failed = overview.failed_projects.len(),
            "client overview built"
        );
        Ok(overview)
    }

    async fn project_tasks(&self, project: &Project) -> GatewayResult<Vec<Task>> {
        let tasks = self.gateway.list_by_project(project.id()).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == TaskStatus::InProgress)
            .map(|task| task.with_project_name(project.name()))
            .collect())
    }
}
