//! User-facing notifications.
//!
//! Flows push notices here; view code drains and renders them. The core
//! never localizes: `message` carries a stable key the view layer resolves.

/// How prominently a notification should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice.
    Info,
    /// Something went wrong and the user should know.
    Error,
}

/// One user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Rendering severity.
    pub severity: Severity,
    /// Stable message key resolved by the view layer.
    pub message: String,
}

/// Ordered collection of pending notifications.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.items.push(Notification { severity: Severity::Error, message: message.into() });
    }

    /// Queue an informational notice.
    pub fn info(&mut self, message: impl Into<String>) {
        self.items.push(Notification { severity: Severity::Info, message: message.into() });
    }

    /// Pending notifications, oldest first.
    pub fn pending(&self) -> &[Notification] {
        &self.items
    }

    /// Drop all pending notifications.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether anything is pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_queue_in_order() {
        let mut notifications = Notifications::new();
        notifications.error("unable-retrieve-url");
        notifications.info("url-copied");

        let pending = notifications.pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].severity, Severity::Error);
        assert_eq!(pending[1].message, "url-copied");

        notifications.clear();
        assert!(notifications.is_empty());
    }
}
