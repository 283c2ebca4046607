//! Domain primitives, ports, and the user lifecycle service.
//!
//! Purpose: Define strongly typed domain entities and the use-case surface
//! consumed by presentation layers. Keep types transport agnostic and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — typed failure payload surfaced to callers.
//! - [`User`] / [`UserStatus`] — domain user entity and status state machine.
//! - [`UserService`] — lifecycle service implementing the driving ports.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    ADULT_AGE, NewUser, ParseUserStatusError, User, UserId, UserIdError, UserStatus,
};
pub use self::user_service::UserService;

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
