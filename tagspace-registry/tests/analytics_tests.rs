use pretty_assertions::assert_eq;
use tagspace_model::Payload;
use tagspace_registry::{AspectCount, Registry, MAX_SUGGESTIONS};
use tagspace_types::{CompoundIdentity, QualifiedTag};

fn id(tags: &[&str]) -> CompoundIdentity {
    CompoundIdentity::parse(tags).unwrap()
}

fn tag(s: &str) -> QualifiedTag {
    QualifiedTag::parse(s).unwrap()
}

fn registry_of(identities: &[&[&str]]) -> Registry {
    let registry = Registry::new();
    for (i, tags) in identities.iter().enumerate() {
        registry
            .register(*tags, Payload::entity(format!("e{i}")))
            .unwrap();
    }
    registry
}

// ── Frequency & stats ────────────────────────────────────────────

#[test]
fn aspect_frequency_descending_with_canonical_ties() {
    let registry = registry_of(&[&["a/x", "a/y"], &["a/x", "a/y", "a/z"], &["a/y", "a/w"]]);
    assert_eq!(
        registry.aspect_frequency(),
        vec![
            AspectCount { aspect: tag("a/y"), count: 3 },
            AspectCount { aspect: tag("a/x"), count: 2 },
            AspectCount { aspect: tag("a/w"), count: 1 },
            AspectCount { aspect: tag("a/z"), count: 1 },
        ]
    );
}

#[test]
fn identity_stats_largest_first() {
    let registry = registry_of(&[&["a/x", "a/y"], &["a/x", "a/y", "a/z"], &["a/w", "a/y"]]);
    let sizes: Vec<(CompoundIdentity, usize)> = registry
        .identity_stats()
        .into_iter()
        .map(|s| (s.identity, s.size))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (id(&["a/x", "a/y", "a/z"]), 3),
            (id(&["a/w", "a/y"]), 2),
            (id(&["a/x", "a/y"]), 2),
        ]
    );
}

#[test]
fn analytics_on_empty_registry() {
    let registry = Registry::new();
    assert!(registry.aspect_frequency().is_empty());
    assert!(registry.identity_stats().is_empty());
    assert_eq!(registry.correlation_matrix().tags().count(), 0);
}

// ── Correlation ──────────────────────────────────────────────────

#[test]
fn correlation_is_cooccurrence_over_total() {
    let registry = registry_of(&[&["a/x", "a/y"], &["a/x", "a/y", "a/z"], &["a/y", "a/w"], &["b/p", "b/q"]]);
    let m = registry.correlation_matrix();
    assert_eq!(m.get(&tag("a/x"), &tag("a/y")), 0.5);
    assert_eq!(m.get(&tag("a/y"), &tag("a/y")), 0.75);
    assert_eq!(m.get(&tag("a/z"), &tag("a/w")), 0.0);
    assert_eq!(m.get(&tag("b/p"), &tag("b/q")), 0.25);
}

#[test]
fn correlation_is_symmetric() {
    let registry = registry_of(&[&["a/x", "a/y"], &["a/x", "a/y", "a/z"], &["a/y", "a/w"]]);
    let m = registry.correlation_matrix();
    for (a, b, value) in m.iter() {
        assert_eq!(value, m.get(b, a), "{a} vs {b}");
    }
}

// ── Neighbors ────────────────────────────────────────────────────

#[test]
fn neighbors_use_jaccard_and_exclude_self() {
    let registry = registry_of(&[&["a/x", "a/y"], &["a/x", "a/y", "a/z"], &["a/y", "a/w"], &["b/p", "b/q"]]);
    let query = id(&["a/x", "a/y"]);
    let neighbors = registry.semantic_neighbors(&query);

    let summary: Vec<(CompoundIdentity, f64)> = neighbors
        .iter()
        .map(|n| (n.identity.clone(), n.similarity))
        .collect();
    assert_eq!(
        summary,
        vec![
            (id(&["a/x", "a/y", "a/z"]), 2.0 / 3.0),
            (id(&["a/w", "a/y"]), 1.0 / 3.0),
        ]
    );
    assert_eq!(neighbors[0].shared, query.as_set().clone());
}

#[test]
fn neighbors_of_unregistered_identity() {
    let registry = registry_of(&[&["a/x", "a/y"]]);
    let neighbors = registry.semantic_neighbors(&id(&["a/x", "c/new"]));
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].similarity, 1.0 / 3.0);
}

#[test]
fn equal_similarity_ties_are_canonical() {
    let registry = registry_of(&[&["a/x", "c/c"], &["a/x", "b/b"]]);
    let neighbors = registry.semantic_neighbors(&id(&["a/x", "z/z"]));
    assert_eq!(neighbors[0].identity, id(&["a/x", "b/b"]));
    assert_eq!(neighbors[1].identity, id(&["a/x", "c/c"]));
}

// ── Missing aspects ──────────────────────────────────────────────

#[test]
fn missing_aspects_ranks_tags_absent_from_identity() {
    let registry = registry_of(&[
        &["entity/function", "tier/service", "effect/pure"],
        &["entity/function", "tier/service", "effect/io"],
        &["entity/function", "tier/service", "effect/pure", "doc/public"],
    ]);
    let query = id(&["entity/function", "effect/pure"]);
    let suggestions = registry.missing_aspects(&query);

    assert_eq!(suggestions[0].aspect, tag("tier/service"));
    assert_eq!(suggestions[0].correlation, 1.0);
    let rest: Vec<QualifiedTag> = suggestions[1..].iter().map(|s| s.aspect.clone()).collect();
    assert_eq!(rest, vec![tag("doc/public"), tag("effect/io")]);
    assert!(suggestions.iter().all(|s| !query.contains(&s.aspect)));
}

#[test]
fn missing_aspects_caps_suggestions() {
    let registry = registry_of(&[
        &["a/x", "b/1", "b/2", "b/3"],
        &["a/x", "b/4", "b/5", "b/6"],
        &["a/x", "b/7", "b/8"],
    ]);
    let suggestions = registry.missing_aspects(&id(&["a/x", "a/y"]));
    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
}

#[test]
fn missing_aspects_without_neighbors_is_empty() {
    let registry = registry_of(&[&["a/x", "a/y"]]);
    assert!(registry.missing_aspects(&id(&["z/x", "z/y"])).is_empty());
}
