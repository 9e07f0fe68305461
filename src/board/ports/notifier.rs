//! Sink for user-visible notices.

use crate::board::domain::Notice;

/// Receives notices raised by board operations.
///
/// Implementations must not block; the workflow calls them while no lock is
/// held but in the middle of an operation.
pub trait Notifier: Send + Sync {
    /// Shows or records `notice`.
    fn notify(&self, notice: Notice);
}
