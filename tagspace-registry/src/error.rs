//! Error types for the registry layer.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur in registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The tag-set is not a well-formed compound identity. Nothing was stored.
    #[error(transparent)]
    InvalidIdentity(#[from] tagspace_types::Error),

    /// An algebra query had no recognized operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
