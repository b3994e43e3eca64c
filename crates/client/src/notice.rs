//! Transient notifications (toasts) queued for the UI.

use std::collections::VecDeque;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Notices waiting to be shown, oldest first.
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    /// Queue a success notice.
    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(notice = %message, "Success notice");
        self.queue.push_back(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    /// Queue an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(notice = %message, "Error notice");
        self.queue.push_back(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    /// Number of notices waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Most recently queued notice.
    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Take every waiting notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let mut notices = Notices::default();
        notices.success("Mint Chip created");
        notices.error("Not authorized");

        assert_eq!(notices.len(), 2);
        assert_eq!(
            notices.last().map(|n| n.level),
            Some(NoticeLevel::Error)
        );

        let drained = notices.drain();
        assert_eq!(drained[0].message, "Mint Chip created");
        assert_eq!(drained[0].level, NoticeLevel::Success);
        assert_eq!(drained[1].message, "Not authorized");
        assert!(notices.is_empty());
    }
}
