//! Entity model for tagspace.
//!
//! Defines the types that give registry entries their meaning:
//! - [`Payload`] — the record stored per identity (entity id, data keys
//!   consumed and produced, structural dependencies, free-form JSON)
//! - [`Vocabulary`] — which marker tags denote roles, tiers and the
//!   properties anomaly rules and axioms reason about
//!
//! These types are shared by the registry, the axiom engine and the CLI.

mod payload;
mod vocabulary;

pub use payload::Payload;
pub use vocabulary::Vocabulary;
