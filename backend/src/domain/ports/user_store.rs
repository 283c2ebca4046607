//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewUser, User, UserId, UserStatus};

/// Persistence errors raised by [`UserStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// The unique-email constraint rejected a write.
    ///
    /// The service checks for duplicates before writing, but two concurrent
    /// creates can both pass that check; the store is the final arbiter.
    #[error("email {email} is already registered")]
    EmailTaken { email: String },
}

impl UserStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-email violations.
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }
}

/// Durable keyed record store for user entities.
///
/// Adapters assign the identifier and creation timestamp when persisting a
/// [`NewUser`] draft, and must keep both immutable on subsequent updates.
/// They also enforce email uniqueness across the whole population.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a draft, assigning its identifier and creation timestamp.
    async fn create(&self, draft: NewUser) -> Result<User, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Fetch all users whose name contains the fragment (case-sensitive).
    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<User>, UserStoreError>;

    /// Fetch all users with the given status.
    async fn find_by_status(&self, status: UserStatus) -> Result<Vec<User>, UserStoreError>;

    /// Fetch all users whose age is at least `age`.
    async fn find_by_age_at_least(&self, age: i32) -> Result<Vec<User>, UserStoreError>;

    /// Whether any user holds this exact email, regardless of status.
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError>;

    /// Count users with the given status.
    async fn count_by_status(&self, status: UserStatus) -> Result<u64, UserStoreError>;

    /// Persist changes to an existing user and return the stored record.
    async fn update(&self, user: &User) -> Result<User, UserStoreError>;

    /// Remove a user permanently.
    async fn delete(&self, user: &User) -> Result<(), UserStoreError>;
}
