//! In-memory registry of compound identities.
//!
//! A program describes its functions, components and endpoints as sets of
//! qualified tags and registers each with a [`Payload`]. This crate stores
//! those entries and answers questions about the tag space.
//!
//! ## Components
//!
//! - **Store**: [`Registry`] publishes immutable [`Snapshot`]s; register and
//!   remove swap in a new snapshot atomically
//! - **Query & algebra**: superset queries, exact lookup, and
//!   intersection/union/difference composition ([`AlgebraOp`])
//! - **Analytics**: tag frequency, identity sizes, the correlation matrix,
//!   Jaccard neighbors and missing-tag suggestions
//! - **Anomalies**: a fixed, extensible list of per-identity tag rules
//!
//! Every read runs against one snapshot and is deterministic: outputs are
//! sorted canonically.
//!
//! # Example
//!
//! ```
//! use tagspace_model::Payload;
//! use tagspace_registry::Registry;
//! use tagspace_types::aspects;
//!
//! let registry = Registry::new();
//! registry.register(["a/x", "a/y"], Payload::entity("one")).unwrap();
//! registry.register(["a/x", "a/y", "a/z"], Payload::entity("two")).unwrap();
//!
//! let found = registry.query(&aspects(["a/x", "a/y"]).unwrap());
//! assert_eq!(found.len(), 2);
//! ```
//!
//! [`Payload`]: tagspace_model::Payload

mod analytics;
mod anomaly;
mod error;
mod query;
mod store;

pub use analytics::{
    AspectCount, AspectSuggestion, CorrelationMatrix, IdentityStat, Neighbor, MAX_SUGGESTIONS,
};
pub use anomaly::{Anomaly, AnomalyRule};
pub use error::{RegistryError, RegistryResult};
pub use query::{AlgebraOp, AspectSet};
pub use store::{Existence, Registry, Snapshot};
