//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic.
//!
//! - **persistence**: in-memory user store with store-side unique-email
//!   enforcement
//! - **notify**: notifier that records dispatches in the log stream

pub mod notify;
pub mod persistence;
