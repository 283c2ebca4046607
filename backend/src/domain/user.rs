//! User entity and status state machine.
//!
//! The [`User`] aggregate mirrors the persisted record: the store assigns
//! `id` and `created_at` on creation and both stay immutable afterwards.
//! [`NewUser`] is the draft handed to the store before those fields exist.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Age from which a user counts as an adult.
pub const ADULT_AGE: i32 = 18;

/// Validation error returned by [`UserId::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// Identifiers are assigned by the store and are always positive.
    #[error("user id must be a positive integer")]
    NonPositive,
}

/// Stable user identifier assigned by the store.
///
/// ## Invariants
/// - The wrapped value is strictly positive.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::try_new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::try_new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn try_new(id: i64) -> Result<Self, UserIdError> {
        if id <= 0 {
            return Err(UserIdError::NonPositive);
        }
        Ok(Self(id))
    }

    /// Access the underlying integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// Lifecycle status of a user account.
///
/// Only two transitions are reachable through the lifecycle service:
/// `Active -> Inactive` (deactivate) and `Inactive -> Active` (reactivate).
/// `Suspended` is part of the domain but no operation transitions into or
/// out of it; it is reserved for future moderation flows.
///
/// # Examples
/// ```
/// use backend::domain::UserStatus;
///
/// assert_eq!(UserStatus::default(), UserStatus::Active);
/// assert_eq!(UserStatus::Inactive.as_str(), "inactive");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is live and visible to queries scoped to active users.
    #[default]
    Active,
    /// Account has been deactivated and can be reactivated.
    Inactive,
    /// Account is suspended; no lifecycle operation reaches this state.
    Suspended,
}

impl UserStatus {
    /// Returns the wire/database string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user status: {input}")]
pub struct ParseUserStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for UserStatus {
    type Err = ParseUserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ParseUserStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Application user as stored by a [`UserStore`](crate::domain::ports::UserStore).
///
/// ## Invariants
/// - `name` and `email` are non-empty trimmed text once stored.
/// - `email` is unique across the whole population, regardless of status.
/// - `age` is never negative.
/// - `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name, trimmed.
    pub name: String,
    /// Contact email, trimmed and unique.
    pub email: String,
    /// Age in years, non-negative.
    pub age: i32,
    /// Lifecycle status.
    pub status: UserStatus,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user has reached [`ADULT_AGE`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{User, UserId, UserStatus};
    /// use chrono::Utc;
    ///
    /// let user = User {
    ///     id: UserId::try_new(1).expect("positive id"),
    ///     name: "Ada".to_owned(),
    ///     email: "ada@example.com".to_owned(),
    ///     age: 18,
    ///     status: UserStatus::Active,
    ///     created_at: Utc::now(),
    /// };
    /// assert!(user.is_adult());
    /// ```
    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }

    /// Mark the account as active.
    pub const fn activate(&mut self) {
        self.status = UserStatus::Active;
    }

    /// Mark the account as inactive.
    pub const fn deactivate(&mut self) {
        self.status = UserStatus::Inactive;
    }
}

/// Draft user prior to persistence.
///
/// The store assigns the identifier and creation timestamp when the draft is
/// persisted, so neither field appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name, already trimmed by the lifecycle service.
    pub name: String,
    /// Contact email, already trimmed by the lifecycle service.
    pub email: String,
    /// Age in years, already validated as non-negative.
    pub age: i32,
    /// Initial lifecycle status.
    pub status: UserStatus,
}

impl NewUser {
    /// Build a draft with the default [`UserStatus::Active`] status.
    pub fn active(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            status: UserStatus::Active,
        }
    }
}
