// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-visible notifications

use colored::Colorize;
use serde::Serialize;
use std::sync::Mutex;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Where notices go
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Prints notices to stderr with colored markers
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => eprintln!("{} {}", "✓".green(), notice.message),
            NoticeLevel::Warning => eprintln!("{} {}", "⚠".yellow(), notice.message.yellow()),
            NoticeLevel::Error => eprintln!("{} {}", "✗".red(), notice.message.red()),
        }
    }
}

/// Drops notices; used when the run report is printed instead
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Keeps every notice in memory
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify(&Notice::warning("first"));
        notifier.notify(&Notice::info("second"));
        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[1].message, "second");
    }

    #[test]
    fn notice_serializes_lowercase_level() {
        let json = serde_json::to_value(Notice::error("boom")).expect("json");
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "boom");
    }
}
