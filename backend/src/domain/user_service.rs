//! User lifecycle domain service.
//!
//! Orchestrates validation, uniqueness checking, persistence, and
//! best-effort notification around user state changes. The service holds no
//! mutable state of its own, so a single instance is safe to share across
//! concurrent callers; everything mutable lives behind the store port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateUserRequest, Notifier, NotifierError, UpdateUserRequest, UserCommand, UserQuery,
    UserStore, UserStoreError,
};
use crate::domain::validation::{has_required_text, is_non_negative_age, is_well_formed_email};
use crate::domain::{ADULT_AGE, Error, NewUser, User, UserId, UserStatus};

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        // Check-then-act race lost: the store's unique constraint is the
        // final arbiter, so surface it as the same duplicate failure the
        // pre-write check produces.
        UserStoreError::EmailTaken { email } => {
            Error::duplicate_email(format!("email {email} is already registered"))
        }
    }
}

fn log_dispatch_outcome(kind: &'static str, email: &str, outcome: Result<(), NotifierError>) {
    if let Err(error) = outcome {
        warn!(kind, email, %error, "notification dispatch failed");
    }
}

/// Lifecycle service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> UserService<S, N> {
    /// Create a new service with the given store and notifier.
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }
}

impl<S, N> UserService<S, N>
where
    S: UserStore,
    N: Notifier,
{
    async fn resolve_user(&self, id: Option<i64>) -> Result<User, Error> {
        let id = id
            .and_then(|raw| UserId::try_new(raw).ok())
            .ok_or_else(|| Error::invalid_input("a positive user id is required"))?;
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no user with id {id}")))
    }
}

#[async_trait]
impl<S, N> UserCommand for UserService<S, N>
where
    S: UserStore,
    N: Notifier,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let name = request.name.as_deref().unwrap_or_default();
        if !has_required_text(name) {
            return Err(Error::invalid_input("name must not be blank"));
        }
        let email = request.email.as_deref().unwrap_or_default();
        if !has_required_text(email) {
            return Err(Error::invalid_input("email must not be blank"));
        }
        let age = request
            .age
            .filter(|candidate| is_non_negative_age(*candidate))
            .ok_or_else(|| Error::invalid_input("age must be a non-negative integer"))?;
        if !is_well_formed_email(email) {
            return Err(Error::invalid_email_format(format!(
                "email {email} is not well formed"
            )));
        }

        let trimmed_email = email.trim();
        if self
            .store
            .exists_by_email(trimmed_email)
            .await
            .map_err(map_store_error)?
        {
            return Err(Error::duplicate_email(format!(
                "email {trimmed_email} is already registered"
            )));
        }

        let draft = NewUser::active(name.trim(), trimmed_email, age);
        let user = self.store.create(draft).await.map_err(map_store_error)?;
        info!(id = %user.id, "user created");

        log_dispatch_outcome(
            "welcome",
            &user.email,
            self.notifier.send_welcome(&user.email, &user.name).await,
        );
        Ok(user)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error> {
        let mut user = self.resolve_user(request.id).await?;

        if let Some(name) = request
            .name
            .as_deref()
            .filter(|value| has_required_text(value))
        {
            user.name = name.trim().to_owned();
        }
        // Strictly positive only: an age of zero is accepted at creation
        // but never applied here.
        if let Some(age) = request.age.filter(|value| *value > 0) {
            user.age = age;
        }

        self.store.update(&user).await.map_err(map_store_error)
    }

    async fn deactivate_user(&self, id: Option<i64>) -> Result<User, Error> {
        let mut user = self.resolve_user(id).await?;
        if user.status == UserStatus::Inactive {
            return Err(Error::invalid_status_transition("user is already inactive"));
        }

        user.deactivate();
        let updated = self.store.update(&user).await.map_err(map_store_error)?;
        info!(id = %updated.id, "user deactivated");

        log_dispatch_outcome(
            "deactivation",
            &updated.email,
            self.notifier
                .send_deactivation(&updated.email, &updated.name)
                .await,
        );
        Ok(updated)
    }

    async fn reactivate_user(&self, id: Option<i64>) -> Result<User, Error> {
        let mut user = self.resolve_user(id).await?;
        if user.status != UserStatus::Inactive {
            return Err(Error::invalid_status_transition(
                "only inactive users can be reactivated",
            ));
        }

        user.activate();
        let updated = self.store.update(&user).await.map_err(map_store_error)?;
        info!(id = %updated.id, "user reactivated");

        log_dispatch_outcome(
            "reactivation",
            &updated.email,
            self.notifier
                .send_reactivation(&updated.email, &updated.name)
                .await,
        );
        Ok(updated)
    }

    async fn delete_user(&self, id: Option<i64>) -> Result<(), Error> {
        let user = self.resolve_user(id).await?;
        self.store.delete(&user).await.map_err(map_store_error)?;
        info!(id = %user.id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, N> UserQuery for UserService<S, N>
where
    S: UserStore,
    N: Notifier,
{
    async fn user_by_id(&self, id: Option<i64>) -> Result<User, Error> {
        self.resolve_user(id).await
    }

    async fn user_by_email(&self, email: &str) -> Result<User, Error> {
        if !has_required_text(email) {
            return Err(Error::invalid_input("email must not be blank"));
        }
        let trimmed = email.trim();
        self.store
            .find_by_email(trimmed)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no user with email {trimmed}")))
    }

    async fn list_active_users(&self) -> Result<Vec<User>, Error> {
        self.store
            .find_by_status(UserStatus::Active)
            .await
            .map_err(map_store_error)
    }

    async fn search_users_by_name(&self, fragment: &str) -> Result<Vec<User>, Error> {
        if !has_required_text(fragment) {
            return Err(Error::invalid_input("a search fragment is required"));
        }
        self.store
            .find_by_name_contains(fragment.trim())
            .await
            .map_err(map_store_error)
    }

    async fn count_active_users(&self) -> Result<u64, Error> {
        self.store
            .count_by_status(UserStatus::Active)
            .await
            .map_err(map_store_error)
    }

    async fn list_adult_users(&self) -> Result<Vec<User>, Error> {
        self.store
            .find_by_age_at_least(ADULT_AGE)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
