//! Kanban task board workflow for Flow.
//!
//! Keeps a board's tasks in memory, groups them into status columns, applies
//! status changes optimistically and reconciles with the backend, which
//! stays the authority for persisted state. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
