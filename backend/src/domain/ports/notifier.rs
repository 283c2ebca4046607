//! Driven port for best-effort user notifications.
//!
//! Dispatch outcomes are observed (logged, counted in tests) but never
//! awaited for correctness: a failed dispatch must not fail the lifecycle
//! operation that triggered it.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by [`Notifier`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    /// The message could not be handed to the delivery channel.
    #[error("notification dispatch failed: {message}")]
    Dispatch { message: String },
}

impl NotifierError {
    /// Helper for dispatch failures.
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }
}

/// Dispatches lifecycle notifications to a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Greet a freshly created user.
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), NotifierError>;

    /// Inform a user their account was deactivated.
    async fn send_deactivation(&self, email: &str, name: &str) -> Result<(), NotifierError>;

    /// Inform a user their account was reactivated.
    async fn send_reactivation(&self, email: &str, name: &str) -> Result<(), NotifierError>;
}

/// Fixture notifier that discards every dispatch.
///
/// Use it where notification behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn send_welcome(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Ok(())
    }

    async fn send_deactivation(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Ok(())
    }

    async fn send_reactivation(&self, _email: &str, _name: &str) -> Result<(), NotifierError> {
        Ok(())
    }
}
