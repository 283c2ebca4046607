//! Test utilities for the backend crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled only under test or when the `test-support` feature is
//! enabled.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{Notifier, NotifierError};

/// The notification kinds a [`Notifier`] can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Greeting sent after a successful create.
    Welcome,
    /// Sent after a deactivation persists.
    Deactivation,
    /// Sent after a reactivation persists.
    Reactivation,
}

/// A dispatch observed by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// Which notification was dispatched.
    pub kind: NotificationKind,
    /// Recipient email as handed to the notifier.
    pub email: String,
    /// Recipient name as handed to the notifier.
    pub name: String,
}

/// Notifier double that records every dispatch for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingNotifier {
    fn record(&self, kind: NotificationKind, email: &str, name: &str) {
        let mut guard = self.sent.lock().expect("notifier log poisoned");
        guard.push(SentNotification {
            kind,
            email: email.to_owned(),
            name: name.to_owned(),
        });
    }

    /// Snapshot of everything dispatched so far, in order.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().expect("notifier log poisoned").clone()
    }

    /// Count dispatches of one kind.
    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.sent()
            .iter()
            .filter(|notification| notification.kind == kind)
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        self.record(NotificationKind::Welcome, email, name);
        Ok(())
    }

    async fn send_deactivation(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        self.record(NotificationKind::Deactivation, email, name);
        Ok(())
    }

    async fn send_reactivation(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        self.record(NotificationKind::Reactivation, email, name);
        Ok(())
    }
}

/// Notifier double whose every dispatch fails.
///
/// Use it to assert the best-effort contract: lifecycle operations must
/// succeed even when delivery is down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_welcome(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Err(NotifierError::dispatch("delivery channel down"))
    }

    async fn send_deactivation(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Err(NotifierError::dispatch("delivery channel down"))
    }

    async fn send_reactivation(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Err(NotifierError::dispatch("delivery channel down"))
    }
}
