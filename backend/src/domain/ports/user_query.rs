//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read user data without importing
//! outbound persistence concerns. Result ordering follows storage order;
//! callers needing a stable presentation order sort on their side.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for user lookups and listings.
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a user by identifier.
    ///
    /// Missing or non-positive identifiers are rejected without touching
    /// the store.
    async fn user_by_id(&self, id: Option<i64>) -> Result<User, Error>;

    /// Fetch a user by email, trimmed before lookup.
    async fn user_by_email(&self, email: &str) -> Result<User, Error>;

    /// List all users with [`crate::domain::UserStatus::Active`] status.
    async fn list_active_users(&self) -> Result<Vec<User>, Error>;

    /// List all users whose name contains the fragment (case-sensitive).
    async fn search_users_by_name(&self, fragment: &str) -> Result<Vec<User>, Error>;

    /// Count users with [`crate::domain::UserStatus::Active`] status.
    async fn count_active_users(&self) -> Result<u64, Error>;

    /// List all users aged [`crate::domain::ADULT_AGE`] or more.
    async fn list_adult_users(&self) -> Result<Vec<User>, Error>;
}
