//! Frequency, correlation and similarity analytics over a snapshot.
//!
//! Ties are always broken by canonical order (tags by namespace then name,
//! identities by their sorted tag sequence) so every output is reproducible.

use crate::store::{Registry, Snapshot};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tagspace_model::Payload;
use tagspace_types::{CompoundIdentity, QualifiedTag};

/// Most suggestions returned by [`Snapshot::missing_aspects`].
pub const MAX_SUGGESTIONS: usize = 5;

/// How many identities carry one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectCount {
    pub aspect: QualifiedTag,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityStat {
    pub identity: CompoundIdentity,
    pub size: usize,
    pub payload: Payload,
}

/// Another identity that shares tags with the query identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub identity: CompoundIdentity,
    pub shared: BTreeSet<QualifiedTag>,
    /// Jaccard coefficient, in (0, 1].
    pub similarity: f64,
}

/// A tag the query identity's neighbors commonly carry but it lacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectSuggestion {
    pub aspect: QualifiedTag,
    /// Share of neighbors carrying the tag.
    pub correlation: f64,
}

/// Pairwise co-occurrence rates.
///
/// Only pairs that co-occur in at least one identity are stored, the
/// diagonal included; [`CorrelationMatrix::get`] reads absent pairs as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    rows: BTreeMap<QualifiedTag, BTreeMap<QualifiedTag, f64>>,
}

impl CorrelationMatrix {
    /// Share of identities containing both `a` and `b`.
    #[must_use]
    pub fn get(&self, a: &QualifiedTag, b: &QualifiedTag) -> f64 {
        self.rows
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every tag with a row, in canonical order.
    pub fn tags(&self) -> impl Iterator<Item = &QualifiedTag> {
        self.rows.keys()
    }

    /// Iterates `(a, b, value)` over all stored pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedTag, &QualifiedTag, f64)> {
        self.rows
            .iter()
            .flat_map(|(a, row)| row.iter().map(move |(b, v)| (a, b, *v)))
    }
}

/// Counts tags, most frequent first, ties in canonical tag order.
fn ranked_counts<'a>(tags: impl Iterator<Item = &'a QualifiedTag>) -> Vec<(QualifiedTag, usize)> {
    let mut counts: BTreeMap<&QualifiedTag, usize> = BTreeMap::new();
    for tag in tags {
        *counts.entry(tag).or_default() += 1;
    }
    let mut ranked: Vec<_> = counts
        .into_iter()
        .map(|(tag, count)| (tag.clone(), count))
        .collect();
    // BTreeMap iteration is canonical, so a stable sort keeps ties canonical.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn jaccard(a: &CompoundIdentity, b: &CompoundIdentity) -> (BTreeSet<QualifiedTag>, f64) {
    let shared: BTreeSet<QualifiedTag> = a.as_set().intersection(b.as_set()).cloned().collect();
    let union = a.len() + b.len() - shared.len();
    let similarity = if union == 0 {
        0.0
    } else {
        shared.len() as f64 / union as f64
    };
    (shared, similarity)
}

impl Snapshot {
    /// Number of identities containing each tag, descending.
    #[must_use]
    pub fn aspect_frequency(&self) -> Vec<AspectCount> {
        ranked_counts(self.identities().flat_map(|id| id.tags()))
            .into_iter()
            .map(|(aspect, count)| AspectCount { aspect, count })
            .collect()
    }

    /// Every entry with its identity size, largest first.
    #[must_use]
    pub fn identity_stats(&self) -> Vec<IdentityStat> {
        let mut stats: Vec<IdentityStat> = self
            .entries()
            .map(|(identity, payload)| IdentityStat {
                identity: identity.clone(),
                size: identity.len(),
                payload: payload.clone(),
            })
            .collect();
        stats.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.identity.cmp(&b.identity)));
        stats
    }

    /// Co-occurrence of every tag pair divided by the identity count.
    #[must_use]
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        let mut counts: BTreeMap<&QualifiedTag, BTreeMap<&QualifiedTag, usize>> = BTreeMap::new();
        for identity in self.identities() {
            for a in identity.tags() {
                let row = counts.entry(a).or_default();
                for b in identity.tags() {
                    *row.entry(b).or_default() += 1;
                }
            }
        }

        let total = self.len().max(1) as f64;
        let rows = counts
            .into_iter()
            .map(|(a, row)| {
                let row = row
                    .into_iter()
                    .map(|(b, n)| (b.clone(), n as f64 / total))
                    .collect();
                (a.clone(), row)
            })
            .collect();
        CorrelationMatrix { rows }
    }

    /// Registered identities similar to `identity`, most similar first.
    ///
    /// `identity` itself and identities sharing no tag are left out. The
    /// query identity does not have to be registered.
    #[must_use]
    pub fn semantic_neighbors(&self, identity: &CompoundIdentity) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = self
            .identities()
            .filter(|other| *other != identity)
            .filter_map(|other| {
                let (shared, similarity) = jaccard(identity, other);
                (similarity > 0.0).then(|| Neighbor {
                    identity: other.clone(),
                    shared,
                    similarity,
                })
            })
            .collect();
        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        neighbors
    }

    /// Tags common among the neighbors of `identity` that it does not carry.
    ///
    /// Frequencies are taken over all neighbors; the top
    /// [`MAX_SUGGESTIONS`] are kept.
    #[must_use]
    pub fn missing_aspects(&self, identity: &CompoundIdentity) -> Vec<AspectSuggestion> {
        let neighbors = self.semantic_neighbors(identity);
        if neighbors.is_empty() {
            return Vec::new();
        }
        let neighbor_count = neighbors.len() as f64;

        ranked_counts(neighbors.iter().flat_map(|n| n.identity.tags()))
            .into_iter()
            .filter(|(tag, _)| !identity.contains(tag))
            .take(MAX_SUGGESTIONS)
            .map(|(aspect, frequency)| AspectSuggestion {
                aspect,
                correlation: frequency as f64 / neighbor_count,
            })
            .collect()
    }
}

impl Registry {
    /// See [`Snapshot::aspect_frequency`].
    #[must_use]
    pub fn aspect_frequency(&self) -> Vec<AspectCount> {
        self.snapshot().aspect_frequency()
    }

    /// See [`Snapshot::identity_stats`].
    #[must_use]
    pub fn identity_stats(&self) -> Vec<IdentityStat> {
        self.snapshot().identity_stats()
    }

    /// See [`Snapshot::correlation_matrix`].
    #[must_use]
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        self.snapshot().correlation_matrix()
    }

    /// See [`Snapshot::semantic_neighbors`].
    #[must_use]
    pub fn semantic_neighbors(&self, identity: &CompoundIdentity) -> Vec<Neighbor> {
        self.snapshot().semantic_neighbors(identity)
    }

    /// See [`Snapshot::missing_aspects`].
    #[must_use]
    pub fn missing_aspects(&self, identity: &CompoundIdentity) -> Vec<AspectSuggestion> {
        self.snapshot().missing_aspects(identity)
    }
}
