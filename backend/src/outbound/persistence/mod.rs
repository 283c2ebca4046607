//! Persistence adapters for the [`UserStore`](crate::domain::ports::UserStore) port.

mod memory;

pub use memory::InMemoryUserStore;
