//! Domain model for the task board.
//!
//! Tasks, projects and comments mirror the backend records. The
//! [`TaskBoard`] owns the local copy of a board and the sequencing of
//! optimistic transitions; [`policy`] decides who may change what.

mod board;
mod comment;
mod draft;
mod error;
mod ids;
mod notice;
pub mod policy;
mod project;
mod search;
mod status;
mod task;

pub use board::{BoardScope, ColumnView, TaskBoard, TransitionTicket};
pub use comment::{CommentBody, CommentThread, TaskComment};
pub use draft::{NewTask, TaskChanges};
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{CommentId, OrganizationId, ProjectId, TaskId};
pub use notice::{Notice, NoticeLevel};
pub use policy::{Actor, BoardAction, Denial};
pub use project::Project;
pub use search::SearchQuery;
pub use status::{BoardColumn, TaskPriority, TaskStatus};
pub use task::{Assignee, Task};
