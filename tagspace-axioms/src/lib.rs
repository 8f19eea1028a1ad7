//! Consistency engine for tagspace.
//!
//! Builds dependency and data-flow graphs over the entities in a registry
//! snapshot and polices architectural rules with them.
//!
//! ## Components
//!
//! - **Graphs**: [`EntityIndex`] merges entries by entity id; [`Graph`]
//!   provides cycle detection, reachability and post-order traversal
//! - **Axioms**: the [`Axiom`] trait and the built-in catalog
//!   ([`default_axioms`]), each a pure, severity-tagged rule
//! - **Engine**: [`AxiomEngine::check_all`] runs the catalog and returns a
//!   [`Report`]; violations are data, never errors
//! - **Ordering**: [`topo_sort`] and [`topo_sort_by_data`] produce
//!   dependency-respecting orders and reject cycles
//!
//! # Example
//!
//! ```
//! use tagspace_axioms::{topo_sort, AxiomEngine};
//! use tagspace_model::Payload;
//! use tagspace_registry::Registry;
//!
//! let registry = Registry::new();
//! registry
//!     .register(["entity/function", "domain/users"], Payload::entity("load").with_deps(["db"]))
//!     .unwrap();
//! registry
//!     .register(["entity/component", "tier/foundation"], Payload::entity("db"))
//!     .unwrap();
//!
//! let order = topo_sort(&registry.snapshot(), &["load", "db"]).unwrap();
//! assert_eq!(order, vec!["db", "load"]);
//!
//! let report = AxiomEngine::default().check_registry(&registry);
//! assert!(report.valid);
//! ```

mod axiom;
mod catalog;
mod config;
mod engine;
mod error;
mod graph;
mod order;

pub use axiom::{Axiom, AxiomContext, Severity, Violation};
pub use catalog::{
    default_axioms, AllReachable, ContextSatisfiable, DepsExist, ExternalNeedsDependency,
    NoCircularDataFlow, NoCircularDeps, NoOrphanResponses, ProtocolDependencyRule, PureHasNoDeps,
    TierPlacement, UniqueEntityIds,
};
pub use config::{AxiomConfig, ProtocolRule};
pub use engine::{AxiomEngine, Report};
pub use error::{AxiomError, AxiomResult};
pub use graph::{Entity, EntityIndex, Graph};
pub use order::{topo_sort, topo_sort_by_data};
