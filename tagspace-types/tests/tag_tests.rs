use std::collections::HashSet;
use std::str::FromStr;
use tagspace_types::{Error, QualifiedTag};

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_keeps_both_parts() {
    let tag = QualifiedTag::new("entity", "function").unwrap();
    assert_eq!(tag.namespace(), "entity");
    assert_eq!(tag.name(), "function");
}

#[test]
fn new_rejects_empty_namespace() {
    assert!(QualifiedTag::new("", "function").is_err());
}

#[test]
fn new_rejects_empty_name() {
    assert!(QualifiedTag::new("entity", "").is_err());
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_splits_at_first_slash() {
    let tag = QualifiedTag::parse("http/route/users").unwrap();
    assert_eq!(tag.namespace(), "http");
    assert_eq!(tag.name(), "route/users");
}

#[test]
fn parse_rejects_bare_name() {
    assert_eq!(
        QualifiedTag::parse("function"),
        Err(Error::InvalidTag("function".into()))
    );
}

#[test]
fn parse_rejects_missing_parts() {
    assert!(QualifiedTag::parse("/function").is_err());
    assert!(QualifiedTag::parse("entity/").is_err());
    assert!(QualifiedTag::parse("/").is_err());
    assert!(QualifiedTag::parse("").is_err());
}

#[test]
fn from_str_matches_parse() {
    let a = QualifiedTag::from_str("tier/api").unwrap();
    let b = QualifiedTag::parse("tier/api").unwrap();
    assert_eq!(a, b);
}

#[test]
fn display_roundtrip() {
    let tag = QualifiedTag::new("auth", "required").unwrap();
    assert_eq!(tag.to_string(), "auth/required");
    assert_eq!(QualifiedTag::parse(&tag.to_string()).unwrap(), tag);
}

// ── Equality, hashing, ordering ──────────────────────────────────

#[test]
fn equality_is_by_pair() {
    let mut set = HashSet::new();
    set.insert(QualifiedTag::parse("a/x").unwrap());
    set.insert(QualifiedTag::new("a", "x").unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
fn ordering_is_namespace_then_name() {
    let a = QualifiedTag::parse("a/z").unwrap();
    let b = QualifiedTag::parse("b/a").unwrap();
    let c = QualifiedTag::parse("b/b").unwrap();
    assert!(a < b);
    assert!(b < c);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_as_string() {
    let tag = QualifiedTag::parse("effect/pure").unwrap();
    assert_eq!(serde_json::to_string(&tag).unwrap(), "\"effect/pure\"");
}

#[test]
fn deserialize_rejects_unqualified() {
    let result: Result<QualifiedTag, _> = serde_json::from_str("\"pure\"");
    assert!(result.is_err());
}
