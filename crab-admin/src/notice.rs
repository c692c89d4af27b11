//! User-facing notices
//!
//! Presentation (toasts, status bar, terminal) is up to the embedder; the
//! core only produces [`Notice`] values and hands them to a [`Notifier`].

use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
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

/// Sink for notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log (headless use)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(target: "notice", level = ?notice.level, "{}", notice.message)
            }
            NoticeLevel::Error => tracing::error!(target: "notice", "{}", notice.message),
        }
    }
}

/// Forwards notices to a UI task
impl Notifier for UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        if self.send(notice).is_err() {
            tracing::debug!("Notice receiver dropped");
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain collected notices
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
