//! Error types for the consistency layer.

use thiserror::Error;

/// Result type for axiom and ordering operations.
pub type AxiomResult<T> = Result<T, AxiomError>;

/// Errors that can occur in axiom and ordering operations.
///
/// Axiom violations are not errors: they are reported as data in a
/// [`Report`](crate::Report).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AxiomError {
    /// The requested ordering has a dependency cycle.
    #[error("dependency cycle: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// The axiom configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}
