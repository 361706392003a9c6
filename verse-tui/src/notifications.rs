//! Notification system for the TUI.

use chrono::{DateTime, Duration, Utc};

/// How long a notification stays in the footer.
pub const NOTIFICATION_TTL_SECS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationLevel {
    pub fn label(self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::seconds(NOTIFICATION_TTL_SECS)
    }
}
