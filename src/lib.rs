//! Flowboard: role-based project-management client core.
//!
//! This crate provides the rules layer behind the Flow dashboard: deciding
//! which views a signed-in user may reach, which menu they see, and how task
//! cards move across the kanban board while a remote backend remains the
//! authority for persisted state.
//!
//! # Architecture
//!
//! Flowboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, fakes, etc.)
//!
//! # Modules
//!
//! - [`access`]: Roles, sessions, route guarding and navigation menus
//! - [`board`]: Task board grouping, optimistic status transitions and
//!   comment handling
//! - [`config`]: Client configuration loading

pub mod access;
pub mod board;
pub mod config;
