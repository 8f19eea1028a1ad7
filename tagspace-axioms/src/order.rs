//! Deterministic topological ordering of entities.
//!
//! Both orderings reject cyclic inputs up front: a plain post-order walk
//! would otherwise terminate quietly with an order that breaks the cycle's
//! edges.

use crate::error::{AxiomError, AxiomResult};
use crate::graph::{EntityIndex, Graph};
use std::collections::{BTreeSet, HashSet};
use tagspace_registry::Snapshot;
use tracing::debug;

/// Orders `ids` so every entity follows its declared dependencies within `ids`.
///
/// Ids are taken as roots in the given order; duplicates are ignored and ids
/// with no registered entity are ordered as leaves.
pub fn topo_sort<S: AsRef<str>>(snapshot: &Snapshot, ids: &[S]) -> AxiomResult<Vec<String>> {
    let graph = EntityIndex::from_snapshot(snapshot).dependency_graph();
    ordered(&graph, ids)
}

/// Orders `ids` so every entity follows the producers of its context keys
/// within `ids`.
pub fn topo_sort_by_data<S: AsRef<str>>(
    snapshot: &Snapshot,
    ids: &[S],
) -> AxiomResult<Vec<String>> {
    let graph = EntityIndex::from_snapshot(snapshot).data_flow_graph();
    ordered(&graph, ids)
}

fn ordered<S: AsRef<str>>(graph: &Graph, ids: &[S]) -> AxiomResult<Vec<String>> {
    let mut seen = HashSet::new();
    let roots: Vec<&str> = ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| seen.insert(*id))
        .collect();
    let nodes: BTreeSet<String> = roots.iter().map(|id| id.to_string()).collect();

    let restricted = graph.restricted(&nodes);
    if let Some(cycle) = restricted.find_cycle() {
        debug!(cycle = ?cycle, "ordering rejected");
        return Err(AxiomError::CyclicDependency { cycle });
    }
    Ok(restricted.post_order(roots))
}
