//! User lifecycle service built around hexagonal ports.
//!
//! The domain layer owns the user entity, its validation rules, the status
//! state machine, and the lifecycle service that orchestrates them. Storage
//! and notification are consumed through driven ports so adapters (and test
//! doubles) can be substituted freely.

pub mod domain;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
