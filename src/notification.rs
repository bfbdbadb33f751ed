//! Diagnostic notifications.
//!
//! Non-fatal issues encountered while reading or writing (unknown group
//! codes, malformed values, subclass marker mismatches, comments) are
//! reported to a [`DiagnosticSink`] instead of being printed or aborting the
//! operation. [`NotificationCollection`] keeps them in memory so callers and
//! tests can inspect them; [`TracingSink`] forwards them to `tracing`.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Informational message, e.g. a `999` comment found in the stream.
    Info,
    /// A record kind the codec does not implement was skipped.
    NotImplemented,
    /// Non-fatal warning (unknown code, marker mismatch, count mismatch).
    Warning,
    /// Error that was recovered from (e.g., bad group code value).
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification produced during reading or writing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// Operation that raised it, e.g. `read_line`.
    pub operation: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Name of the file being processed, when known.
    pub source: Option<String>,
    /// Line number in the source, when known.
    pub line: Option<usize>,
}

impl Notification {
    /// Create a new notification without location information.
    pub fn new(
        notification_type: NotificationType,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            operation: operation.into(),
            message: message.into(),
            source: None,
            line: None,
        }
    }

    /// Attach a source location.
    pub fn at(mut self, source: Option<&str>, line: usize) -> Self {
        self.source = source.map(str::to_string);
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}(): {}",
            self.notification_type, self.operation, self.message
        )?;
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, " [{}:{}]", source, line),
            (None, Some(line)) => write!(f, " [line {}]", line),
            (Some(source), None) => write!(f, " [{}]", source),
            (None, None) => Ok(()),
        }
    }
}

/// Receiver for diagnostics raised by the codec.
pub trait DiagnosticSink {
    /// Record a notification.
    fn notify(&mut self, notification: Notification);

    /// Record a warning.
    fn warn(&mut self, operation: &str, message: String) {
        self.notify(Notification::new(NotificationType::Warning, operation, message));
    }

    /// Record a recovered error.
    fn error(&mut self, operation: &str, message: String) {
        self.notify(Notification::new(NotificationType::Error, operation, message));
    }

    /// Record an informational message.
    fn info(&mut self, operation: &str, message: String) {
        self.notify(Notification::new(NotificationType::Info, operation, message));
    }
}

/// Collects notifications during a read/write operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification without location information.
    pub fn push(
        &mut self,
        notification_type: NotificationType,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.items
            .push(Notification::new(notification_type, operation, message));
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Check whether any notification message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|n| n.message.contains(needle))
    }

    /// Move all notifications of `other` into this collection.
    pub fn extend(&mut self, other: NotificationCollection) {
        self.items.extend(other.items);
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl DiagnosticSink for NotificationCollection {
    fn notify(&mut self, notification: Notification) {
        self.items.push(notification);
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Forwards notifications to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notify(&mut self, notification: Notification) {
        match notification.notification_type {
            NotificationType::Error => tracing::error!("{}", notification),
            NotificationType::Warning => tracing::warn!("{}", notification),
            NotificationType::NotImplemented => tracing::debug!("{}", notification),
            NotificationType::Info => tracing::info!("{}", notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(NotificationType::Warning, "read_line", "handle missing");
        assert_eq!(n.notification_type, NotificationType::Warning);
        assert_eq!(n.message, "handle missing");
        assert!(n.line.is_none());
    }

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.warn("read_line", "w1".to_string());
        c.error("read_arc", "e1".to_string());
        c.warn("read_arc", "w2".to_string());

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Warning).len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::NotImplemented));
        assert!(c.contains("e1"));
    }

    #[test]
    fn test_display_with_location() {
        let n = Notification::new(
            NotificationType::Warning,
            "read_line",
            "unknown group code 1234",
        )
        .at(Some("plan.dxf"), 17);
        assert_eq!(
            format!("{}", n),
            "Warning in read_line(): unknown group code 1234 [plan.dxf:17]"
        );
    }

    #[test]
    fn test_display_without_source() {
        let n = Notification::new(NotificationType::Error, "write_line", "degenerate").at(None, 3);
        assert_eq!(format!("{}", n), "Error in write_line(): degenerate [line 3]");
    }
}
