//! Notifier adapter that records dispatches in the log stream.
//!
//! Stands in for a real delivery channel (SMTP, push gateway) by emitting a
//! structured event per dispatch. Because the port is best-effort, swapping
//! this for a networked adapter later requires no domain changes.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Notifier, NotifierError};

/// [`Notifier`] implementation backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        info!(email, name, "welcome notification sent");
        Ok(())
    }

    async fn send_deactivation(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        info!(email, name, "deactivation notification sent");
        Ok(())
    }

    async fn send_reactivation(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        info!(email, name, "reactivation notification sent");
        Ok(())
    }
}
