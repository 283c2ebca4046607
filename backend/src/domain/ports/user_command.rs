//! Driving port for user lifecycle mutations.
//!
//! Inbound adapters (HTTP handlers, CLIs) call this port to mutate users
//! without importing outbound persistence concerns. Parameters mirror what a
//! request binder produces: optional fields stay `Option` so a missing value
//! is distinguishable from a blank one and rejected with the right code.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, User};

/// Parameters for creating a user.
///
/// All fields are optional at the boundary; the lifecycle service rejects
/// missing or blank values with [`crate::domain::ErrorCode::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Display name; trimmed before storage.
    pub name: Option<String>,
    /// Contact email; trimmed before storage.
    pub email: Option<String>,
    /// Age in years; zero is a legal value at creation time.
    pub age: Option<i32>,
}

/// Parameters for a partial user update.
///
/// Absent or blank `name` leaves the stored name untouched. Absent or
/// non-positive `age` leaves the stored age untouched, so an age of zero can
/// never be applied through an update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// Identifier of the user to update.
    pub id: Option<i64>,
    /// Replacement display name, trimmed when applied.
    pub name: Option<String>,
    /// Replacement age, applied only when strictly positive.
    pub age: Option<i32>,
}

/// Domain use-case port for user lifecycle mutations.
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Validate, persist, and announce a new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Apply a partial update to an existing user.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error>;

    /// Transition an active user to inactive and announce it.
    async fn deactivate_user(&self, id: Option<i64>) -> Result<User, Error>;

    /// Transition an inactive user back to active and announce it.
    async fn reactivate_user(&self, id: Option<i64>) -> Result<User, Error>;

    /// Remove a user permanently. No notification is dispatched.
    async fn delete_user(&self, id: Option<i64>) -> Result<(), Error>;
}
