//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserStore`], [`Notifier`]) describe how the domain expects
//! to reach infrastructure; driving ports ([`UserCommand`], [`UserQuery`])
//! describe the use-case surface offered to presentation layers. Each driven
//! port exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

mod notifier;
mod user_command;
mod user_query;
mod user_store;

#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{NoOpNotifier, Notifier, NotifierError};
pub use user_command::{CreateUserRequest, UpdateUserRequest, UserCommand};
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
