//! The axiom abstraction and the context axioms are evaluated against.

use crate::config::AxiomConfig;
use crate::graph::{EntityIndex, Graph};
use serde::Serialize;
use std::fmt;
use tagspace_registry::Snapshot;

/// How much a violated axiom matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity.
    Error,
    /// Reported only.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A failed axiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub axiom: String,
    pub severity: Severity,
    pub message: String,
    /// What the violation is about: keys, entity ids, or a cycle path.
    pub subjects: Vec<String>,
}

/// Everything an axiom may look at, computed once per check run.
pub struct AxiomContext<'a> {
    pub snapshot: &'a Snapshot,
    pub config: &'a AxiomConfig,
    pub entities: EntityIndex,
    pub dependencies: Graph,
    pub data_flow: Graph,
}

impl<'a> AxiomContext<'a> {
    #[must_use]
    pub fn new(snapshot: &'a Snapshot, config: &'a AxiomConfig) -> Self {
        let entities = EntityIndex::from_snapshot(snapshot);
        let dependencies = entities.dependency_graph();
        let data_flow = entities.data_flow_graph();
        Self {
            snapshot,
            config,
            entities,
            dependencies,
            data_flow,
        }
    }
}

/// A named consistency rule.
///
/// Axioms are pure: the same context always yields the same outcome.
pub trait Axiom: Send + Sync {
    fn name(&self) -> &str;

    fn severity(&self) -> Severity;

    /// Returns a violation, or `None` when the rule holds.
    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation>;

    /// Builds a violation of this axiom; `None` when there are no subjects.
    fn violation(&self, message: String, subjects: Vec<String>) -> Option<Violation> {
        if subjects.is_empty() {
            return None;
        }
        Some(Violation {
            axiom: self.name().to_string(),
            severity: self.severity(),
            message,
            subjects,
        })
    }
}
