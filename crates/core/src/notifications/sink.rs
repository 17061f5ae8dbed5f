//! Notification sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::Notification;

/// Trait for surfacing operation outcomes to the user.
///
/// # Design Rules
///
/// - Both methods are fire-and-forget: nothing is returned to the store
/// - Implementations must be fast and non-blocking
/// - A failing sink must not affect the operation that triggered it
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, message: &str);

    fn notify_failure(&self, message: &str);

    /// Dispatches a prepared notification to the matching method.
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::Success(message) => self.notify_success(message),
            Notification::Failure(message) => self.notify_failure(message),
        }
    }
}

/// No-op implementation for contexts that don't surface messages.
#[derive(Clone, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify_success(&self, _message: &str) {}

    fn notify_failure(&self, _message: &str) {}
}

/// Sink that forwards notifications to the `log` facade.
#[derive(Clone, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify_success(&self, message: &str) {
        log::info!("{}", message);
    }

    fn notify_failure(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Mock sink for testing - collects notifications in arrival order.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }

    /// Returns all collected notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Returns the messages of collected notifications.
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .iter()
            .map(|n| n.message().to_string())
            .collect()
    }

    /// Returns the most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    /// Clears collected notifications.
    pub fn clear(&self) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.notifications().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify_success(&self, message: &str) {
        self.record(Notification::success(message));
    }

    fn notify_failure(&self, message: &str) {
        self.record(Notification::failure(message));
    }
}
