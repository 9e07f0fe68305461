//! User-visible notices raised by board operations.

use chrono::{DateTime, Utc};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// The action went through.
    Success,
    /// The action failed.
    Error,
}

/// Transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short heading.
    pub title: String,
    /// Sentence naming the action.
    pub message: String,
    /// Whether the user can simply try again.
    pub retryable: bool,
    /// When the notice was raised.
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(
        title: impl Into<String>,
        message: impl Into<String>,
        raised_at: DateTime<Utc>,
    ) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
            retryable: false,
            raised_at,
        }
    }

    /// Creates a retryable failure notice.
    #[must_use]
    pub fn failure(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_owned(),
            message: message.into(),
            retryable: true,
            raised_at,
        }
    }
}
