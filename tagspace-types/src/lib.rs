//! Core type definitions for tagspace.
//!
//! This crate defines the value types every other tagspace crate is built on:
//! - [`QualifiedTag`] — a `namespace/name` pair used as an atomic marker
//! - [`CompoundIdentity`] — a validated set of at least two qualified tags
//! - the identity validator ([`validate`], [`is_valid`]) and its diagnostic
//!   codes ([`IdentityViolation`])
//!
//! Invalid identities cannot be constructed: every constructor runs the
//! validator first, so downstream crates never re-check the invariants.

mod identity;
mod tag;
mod validate;

pub use identity::{aspects, CompoundIdentity};
pub use tag::QualifiedTag;
pub use validate::{is_valid, validate, IdentityViolation};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building tags and identities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid identity: {0}")]
    InvalidIdentity(IdentityViolation),

    #[error("invalid tag: {0:?} is not of the form namespace/name")]
    InvalidTag(String),
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
