//! In-memory user store adapter.
//!
//! Backs the [`UserStore`] port with a mutex-guarded map, assigning
//! sequential identifiers and clock-sourced creation timestamps. The adapter
//! enforces the unique-email constraint itself: the service-level existence
//! check is check-then-act, so the store has to be the final arbiter when
//! two concurrent creates race on the same email.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId, UserStatus};

struct StoreState {
    next_id: i64,
    // Keyed by raw id; iteration order doubles as storage order.
    users: BTreeMap<i64, User>,
}

/// Thread-safe in-memory implementation of [`UserStore`].
pub struct InMemoryUserStore {
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
}

impl InMemoryUserStore {
    /// Create an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Create an empty store with an injected clock for deterministic
    /// creation timestamps.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(StoreState {
                next_id: 1,
                users: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, UserStoreError> {
        self.state
            .lock()
            .map_err(|_| UserStoreError::connection("user store mutex poisoned"))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, draft: NewUser) -> Result<User, UserStoreError> {
        let created_at = self.clock.utc();
        let mut state = self.lock()?;

        if state.users.values().any(|user| user.email == draft.email) {
            return Err(UserStoreError::email_taken(draft.email));
        }

        let id = UserId::try_new(state.next_id)
            .map_err(|err| UserStoreError::query(format!("id sequence exhausted: {err}")))?;
        state.next_id += 1;

        let user = User {
            id,
            name: draft.name,
            email: draft.email,
            age: draft.age,
            status: draft.status,
            created_at,
        };
        state.users.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state.users.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .filter(|user| user.name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: UserStatus) -> Result<Vec<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .filter(|user| user.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_age_at_least(&self, age: i32) -> Result<Vec<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .filter(|user| user.age >= age)
            .cloned()
            .collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError> {
        let state = self.lock()?;
        Ok(state.users.values().any(|user| user.email == email))
    }

    async fn count_by_status(&self, status: UserStatus) -> Result<u64, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .filter(|user| user.status == status)
            .count() as u64)
    }

    async fn update(&self, user: &User) -> Result<User, UserStoreError> {
        let mut state = self.lock()?;

        let clash = state
            .users
            .values()
            .any(|candidate| candidate.email == user.email && candidate.id != user.id);
        if clash {
            return Err(UserStoreError::email_taken(user.email.clone()));
        }

        let Some(stored) = state.users.get_mut(&user.id.get()) else {
            return Err(UserStoreError::query(format!(
                "no user with id {} to update",
                user.id
            )));
        };

        // The creation timestamp is immutable; keep the stored value.
        let updated = User {
            created_at: stored.created_at,
            ..user.clone()
        };
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, user: &User) -> Result<(), UserStoreError> {
        let mut state = self.lock()?;
        if state.users.remove(&user.id.get()).is_none() {
            return Err(UserStoreError::query(format!(
                "no user with id {} to delete",
                user.id
            )));
        }
        Ok(())
    }
}
