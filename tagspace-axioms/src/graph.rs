//! Entity index and dependency graphs built from a registry snapshot.
//!
//! Graph edges point from a node to the nodes it depends on. All traversals
//! are iterative with explicit stacks and visit nodes in sorted order, so
//! deep graphs cannot overflow the call stack and results are reproducible.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use tagspace_registry::Snapshot;
use tagspace_types::QualifiedTag;

static NO_EDGES: BTreeSet<String> = BTreeSet::new();

/// One entity as seen by the consistency engine.
///
/// Built from every registry entry whose payload carries an id. When several
/// identities carry the same id, their tags and declarations are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub tags: BTreeSet<QualifiedTag>,
    pub context: BTreeSet<String>,
    pub response: BTreeSet<String>,
    pub deps: BTreeSet<String>,
    /// How many identities carry this id.
    pub identities: usize,
}

impl Entity {
    #[must_use]
    pub fn has(&self, tag: &QualifiedTag) -> bool {
        self.tags.contains(tag)
    }
}

/// Entities keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entities: BTreeMap<String, Entity>,
}

impl EntityIndex {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut entities: BTreeMap<String, Entity> = BTreeMap::new();
        for (identity, payload) in snapshot.entries() {
            let Some(id) = payload.id.as_ref() else {
                continue;
            };
            let entity = entities.entry(id.clone()).or_insert_with(|| Entity {
                id: id.clone(),
                ..Default::default()
            });
            entity.tags.extend(identity.tags().cloned());
            entity.context.extend(payload.context.iter().cloned());
            entity.response.extend(payload.response.iter().cloned());
            entity.deps.extend(payload.deps.iter().cloned());
            entity.identities += 1;
        }
        Self { entities }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entities carrying `tag`, in id order.
    pub fn tagged<'a>(&'a self, tag: &'a QualifiedTag) -> impl Iterator<Item = &'a Entity> + 'a {
        self.iter().filter(move |e| e.has(tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The explicit `deps` graph.
    #[must_use]
    pub fn dependency_graph(&self) -> Graph {
        let edges = self
            .iter()
            .map(|e| (e.id.clone(), e.deps.clone()))
            .collect();
        Graph { edges }
    }

    /// The inferred data-flow graph: `b` depends on `a` when a key `a`
    /// produces is one `b` requires. An entity consuming its own output
    /// gets no self edge.
    #[must_use]
    pub fn data_flow_graph(&self) -> Graph {
        let mut producers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for entity in self.iter() {
            for key in &entity.response {
                producers.entry(key).or_default().insert(&entity.id);
            }
        }

        let edges = self
            .iter()
            .map(|consumer| {
                let deps = consumer
                    .context
                    .iter()
                    .filter_map(|key| producers.get(key.as_str()))
                    .flatten()
                    .filter(|producer| **producer != consumer.id)
                    .map(|producer| producer.to_string())
                    .collect();
                (consumer.id.clone(), deps)
            })
            .collect();
        Graph { edges }
    }
}

/// A directed graph over entity ids, node → dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl Graph {
    /// Builds a graph from `(node, dependencies)` pairs.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let edges = edges
            .into_iter()
            .map(|(node, deps)| (node.into(), deps.into_iter().map(Into::into).collect()))
            .collect();
        Self { edges }
    }

    /// Nodes with an entry, in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &String> {
        self.edges.keys()
    }

    /// Direct dependencies of `node`.
    #[must_use]
    pub fn dependencies(&self, node: &str) -> &BTreeSet<String> {
        self.edges.get(node).unwrap_or(&NO_EDGES)
    }

    /// The subgraph over exactly `nodes`; edges leaving the set are dropped.
    #[must_use]
    pub fn restricted(&self, nodes: &BTreeSet<String>) -> Self {
        let edges = nodes
            .iter()
            .map(|node| {
                let deps = self
                    .dependencies(node)
                    .iter()
                    .filter(|dep| nodes.contains(*dep))
                    .cloned()
                    .collect();
                (node.clone(), deps)
            })
            .collect();
        Self { edges }
    }

    /// Finds a cycle by depth-first search.
    ///
    /// Returns the active path from the search root followed by the node the
    /// back edge re-enters, e.g. `[a, b, a]`. A node is checked against the
    /// active path before the fully-explored set.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::new();

        for root in self.nodes() {
            if visited.contains(root.as_str()) {
                continue;
            }
            let mut path: Vec<&str> = vec![root.as_str()];
            let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);
            let mut stack = vec![self.dependencies(root).iter()];

            while let Some(children) = stack.last_mut() {
                match children.next() {
                    Some(next) => {
                        if on_path.contains(next.as_str()) {
                            let mut cycle: Vec<String> =
                                path.iter().map(|n| n.to_string()).collect();
                            cycle.push(next.clone());
                            return Some(cycle);
                        }
                        if visited.contains(next.as_str()) {
                            continue;
                        }
                        path.push(next);
                        on_path.insert(next);
                        stack.push(self.dependencies(next).iter());
                    }
                    None => {
                        stack.pop();
                        if let Some(done) = path.pop() {
                            on_path.remove(done);
                            visited.insert(done);
                        }
                    }
                }
            }
        }
        None
    }

    /// Every node reachable from `roots` along dependency edges, roots included.
    #[must_use]
    pub fn reachable_from<'a>(&'a self, roots: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
        let mut reached: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        for root in roots {
            if reached.insert(root.to_string()) {
                queue.push_back(root);
            }
        }
        while let Some(node) = queue.pop_front() {
            for dep in self.dependencies(node) {
                if reached.insert(dep.clone()) {
                    queue.push_back(dep);
                }
            }
        }
        reached
    }

    /// Post-order depth-first traversal: every node appears after the
    /// dependencies reachable from it. Roots are taken in the given order.
    ///
    /// Does not detect cycles; on a cyclic graph the order is incomplete
    /// with respect to the cycle's edges. Call [`Graph::find_cycle`] first.
    #[must_use]
    pub fn post_order<'a>(&'a self, roots: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();

        for root in roots {
            if !visited.insert(root) {
                continue;
            }
            let mut stack = vec![(root, self.dependencies(root).iter())];
            while let Some((node, children)) = stack.last_mut() {
                match children.next() {
                    Some(next) => {
                        if visited.insert(next.as_str()) {
                            stack.push((next.as_str(), self.dependencies(next).iter()));
                        }
                    }
                    None => {
                        order.push(node.to_string());
                        stack.pop();
                    }
                }
            }
        }
        order
    }
}
