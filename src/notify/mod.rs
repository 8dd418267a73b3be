//! Status banner for success/error feedback
//!
//! At most one notice is live at a time; raising a new one replaces the
//! previous one. Non-error notices expire after the configured interval,
//! errors stay until something replaces them.

use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Severity tag of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status message
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    /// `None` for notices that persist until replaced
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }

    /// One-line rendering prefixed with the local wall-clock time it was raised
    pub fn status_line(&self) -> String {
        format!(
            "{} {}",
            self.raised_at.with_timezone(&Local).format("%H:%M:%S"),
            self
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Holder of the current status notice
#[derive(Debug, Clone)]
pub struct Notifier {
    dismiss_after: Duration,
    current: Option<Notice>,
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            current: None,
        }
    }

    /// Show a notice, replacing whatever was shown before
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) -> &Notice {
        self.notify_at(severity, message, Instant::now())
    }

    /// Same as [`notify`](Self::notify) with an explicit clock reading
    pub fn notify_at(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: Instant,
    ) -> &Notice {
        let notice = Notice {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            raised_at: Utc::now(),
            // An interval too large to add to the clock never expires
            expires_at: if severity.is_error() {
                None
            } else {
                now.checked_add(self.dismiss_after)
            },
        };

        match severity {
            Severity::Error => tracing::warn!(
                notice_id = %notice.id,
                raised_at = %notice.raised_at.to_rfc3339(),
                "{}",
                notice.message
            ),
            _ => tracing::info!(
                notice_id = %notice.id,
                raised_at = %notice.raised_at.to_rfc3339(),
                severity = %severity,
                "{}",
                notice.message
            ),
        }

        self.current.insert(notice)
    }

    pub fn info(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(Severity::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(Severity::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(Severity::Error, message)
    }

    /// The live notice, if any
    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| n.is_visible_at(now))
    }

    /// The last notice raised, expired or not
    pub fn last(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
