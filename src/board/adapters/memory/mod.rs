//! In-memory adapter implementations for testing.
//!
//! These adapters stand in for the Flow backend and the notification
//! surface, with hooks for seeding data and injecting failures.

mod backend;
mod notifier;

pub use backend::InMemoryFlowBackend;
pub use notifier::RecordingNotifier;
