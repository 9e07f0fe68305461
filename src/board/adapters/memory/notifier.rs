//! Notifier that records every notice.

use crate::board::{domain::Notice, ports::Notifier};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe notifier keeping notices in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
