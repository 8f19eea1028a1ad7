//! Superset queries and set-algebraic composition.

use crate::error::{RegistryError, RegistryResult};
use crate::store::{Registry, Snapshot};
use serde_json::Value;
use std::collections::BTreeSet;
use tagspace_model::Payload;
use tagspace_types::{aspects, CompoundIdentity, QualifiedTag};

/// A set of aspects an identity must contain (or avoid).
pub type AspectSet = BTreeSet<QualifiedTag>;

/// A set-algebraic query over the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgebraOp {
    /// Identities that are supersets of every set.
    Intersection(Vec<AspectSet>),
    /// Identities that are supersets of at least one set.
    Union(Vec<AspectSet>),
    /// Identities that are supersets of `include` and share nothing with `exclude`.
    Difference { include: AspectSet, exclude: AspectSet },
}

impl AlgebraOp {
    /// Parses the JSON form of an operation.
    ///
    /// Accepted shapes are `{"intersection": [[tags]..]}`, `{"union": [[tags]..]}`
    /// and `{"difference": [[include], [exclude]]}`. When an object carries
    /// several of these keys, the first in that order is used.
    pub fn from_json(value: &Value) -> RegistryResult<Self> {
        let unsupported = || RegistryError::UnsupportedOperation(value.to_string());
        let object = value.as_object().ok_or_else(unsupported)?;

        if let Some(sets) = object.get("intersection") {
            return Ok(Self::Intersection(parse_sets(sets)?));
        }
        if let Some(sets) = object.get("union") {
            return Ok(Self::Union(parse_sets(sets)?));
        }
        if let Some(pair) = object.get("difference") {
            let mut sets = parse_sets(pair)?;
            if sets.len() != 2 {
                return Err(RegistryError::UnsupportedOperation(format!(
                    "difference expects [include, exclude], got {pair}"
                )));
            }
            let exclude = sets.pop().unwrap_or_default();
            let include = sets.pop().unwrap_or_default();
            return Ok(Self::Difference { include, exclude });
        }

        Err(unsupported())
    }

    fn matches(&self, identity: &CompoundIdentity) -> bool {
        match self {
            Self::Intersection(sets) => sets.iter().all(|s| identity.is_superset_of(s)),
            Self::Union(sets) => sets.iter().any(|s| identity.is_superset_of(s)),
            Self::Difference { include, exclude } => {
                identity.is_superset_of(include) && identity.is_disjoint_from(exclude)
            }
        }
    }
}

fn parse_sets(value: &Value) -> RegistryResult<Vec<AspectSet>> {
    let malformed =
        || RegistryError::UnsupportedOperation(format!("expected arrays of tags, got {value}"));
    value
        .as_array()
        .ok_or_else(malformed)?
        .iter()
        .map(|set| -> RegistryResult<AspectSet> {
            let raw = set
                .as_array()
                .ok_or_else(malformed)?
                .iter()
                .map(|tag| tag.as_str().ok_or_else(malformed))
                .collect::<RegistryResult<Vec<&str>>>()?;
            Ok(aspects(raw)?)
        })
        .collect()
}

/// Deduplicates and sorts identities into canonical order.
fn canonical<'a>(identities: impl Iterator<Item = &'a CompoundIdentity>) -> Vec<CompoundIdentity> {
    identities
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Snapshot {
    /// Every identity that contains all of `aspects`, in canonical order.
    #[must_use]
    pub fn query(&self, aspects: &AspectSet) -> Vec<CompoundIdentity> {
        canonical(self.identities().filter(|id| id.is_superset_of(aspects)))
    }

    /// Supersets of `aspects` with their payloads, smallest identities first.
    ///
    /// Identities of equal size keep insertion order.
    #[must_use]
    pub fn find_with(&self, aspects: &AspectSet) -> Vec<(CompoundIdentity, Payload)> {
        let mut found: Vec<_> = self
            .entries()
            .filter(|(id, _)| id.is_superset_of(aspects))
            .map(|(id, payload)| (id.clone(), payload.clone()))
            .collect();
        found.sort_by_key(|(id, _)| id.len());
        found
    }

    /// Exact-key lookup. A tag-set that cannot be an identity finds nothing.
    #[must_use]
    pub fn find_exact(&self, tags: &AspectSet) -> Option<Payload> {
        let identity = CompoundIdentity::new(tags.iter().cloned()).ok()?;
        self.fetch(&identity).cloned()
    }

    /// Evaluates a set-algebraic query, in canonical order.
    #[must_use]
    pub fn query_algebra(&self, op: &AlgebraOp) -> Vec<CompoundIdentity> {
        canonical(self.identities().filter(|id| op.matches(id)))
    }

    /// Parses and evaluates the JSON form of an algebra query.
    pub fn query_algebra_json(&self, op: &Value) -> RegistryResult<Vec<CompoundIdentity>> {
        Ok(self.query_algebra(&AlgebraOp::from_json(op)?))
    }
}

impl Registry {
    /// See [`Snapshot::query`].
    #[must_use]
    pub fn query(&self, aspects: &AspectSet) -> Vec<CompoundIdentity> {
        self.snapshot().query(aspects)
    }

    /// See [`Snapshot::find_with`].
    #[must_use]
    pub fn find_with(&self, aspects: &AspectSet) -> Vec<(CompoundIdentity, Payload)> {
        self.snapshot().find_with(aspects)
    }

    /// See [`Snapshot::find_exact`].
    #[must_use]
    pub fn find_exact(&self, tags: &AspectSet) -> Option<Payload> {
        self.snapshot().find_exact(tags)
    }

    /// See [`Snapshot::query_algebra`].
    #[must_use]
    pub fn query_algebra(&self, op: &AlgebraOp) -> Vec<CompoundIdentity> {
        self.snapshot().query_algebra(op)
    }

    /// See [`Snapshot::query_algebra_json`].
    pub fn query_algebra_json(&self, op: &Value) -> RegistryResult<Vec<CompoundIdentity>> {
        self.snapshot().query_algebra_json(op)
    }
}
