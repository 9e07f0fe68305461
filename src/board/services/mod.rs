//! Application services for the task board.

mod overview;
mod workflow;

pub use overview::{ClientOverview, OverviewService};
pub use workflow::{
    BoardWorkflowService, Confirmation, TransitionOutcome, WorkflowError, WorkflowResult,
};
