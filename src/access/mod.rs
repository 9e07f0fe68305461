//! Role-based access control for Flow.
//!
//! Resolves a user's roles into route-guard decisions, a navigation menu and
//! fine-grained action permissions, and owns the session lifecycle. Access
//! decisions never fail: a missing session or a role mismatch always resolves
//! to a redirect. The module follows hexagonal architecture:
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
