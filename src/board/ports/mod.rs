//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;
pub mod notifier;

pub use gateway::{GatewayError, GatewayResult, ProjectGateway, TaskGateway};
pub use notifier::Notifier;
