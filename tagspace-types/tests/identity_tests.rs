use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use tagspace_types::{aspects, CompoundIdentity, Error, IdentityViolation, QualifiedTag};

fn tag(s: &str) -> QualifiedTag {
    QualifiedTag::parse(s).unwrap()
}

// ── Validated construction ───────────────────────────────────────

#[test]
fn parse_accepts_two_qualified_tags() {
    let id = CompoundIdentity::parse(&["a/y", "a/x"]).unwrap();
    assert_eq!(id.len(), 2);
    assert_eq!(id.to_strings(), vec!["a/x", "a/y"]);
}

#[test]
fn parse_rejects_single_tag() {
    assert_eq!(
        CompoundIdentity::parse(&["a/x"]),
        Err(Error::InvalidIdentity(IdentityViolation::TooFewElements {
            count: 1
        }))
    );
}

#[test]
fn parse_rejects_unqualified_element() {
    let err = CompoundIdentity::parse(&["a/x", "y"]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidIdentity(IdentityViolation::UnqualifiedTag { tag: "y".into() })
    );
}

#[test]
fn parse_rejects_duplicates() {
    let err = CompoundIdentity::parse(&["a/x", "a/x", "a/y"]).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidIdentity(IdentityViolation::NotASet { .. })
    ));
}

#[test]
fn new_rejects_duplicate_tags() {
    let err = CompoundIdentity::new([tag("a/x"), tag("a/x")]).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidIdentity(IdentityViolation::NotASet { .. })
    ));
}

#[test]
fn try_from_array_and_vec_agree() {
    let a = CompoundIdentity::try_from(["a/x", "b/y"]).unwrap();
    let b = CompoundIdentity::try_from(vec!["b/y".to_string(), "a/x".to_string()]).unwrap();
    assert_eq!(a, b);
}

// ── Set operations ───────────────────────────────────────────────

#[test]
fn superset_and_disjoint() {
    let id = CompoundIdentity::parse(&["a/x", "a/y", "a/z"]).unwrap();
    assert!(id.is_superset_of(&aspects(["a/x", "a/z"]).unwrap()));
    assert!(!id.is_superset_of(&aspects(["a/w"]).unwrap()));
    assert!(id.is_disjoint_from(&aspects(["b/x"]).unwrap()));
    assert!(!id.is_disjoint_from(&aspects(["a/y", "b/x"]).unwrap()));
}

#[test]
fn empty_aspects_are_subset_of_everything() {
    let id = CompoundIdentity::parse(&["a/x", "a/y"]).unwrap();
    assert!(id.is_superset_of(&BTreeSet::new()));
}

#[test]
fn aspects_collapse_duplicates_and_reject_unqualified() {
    assert_eq!(aspects(["a/x", "a/x"]).unwrap().len(), 1);
    assert!(aspects(["a/x", "nope"]).is_err());
}

// ── Ordering & display ───────────────────────────────────────────

#[test]
fn ordering_is_lexicographic_by_sorted_tags() {
    let short = CompoundIdentity::parse(&["a/x", "a/y"]).unwrap();
    let long = CompoundIdentity::parse(&["a/x", "a/y", "a/z"]).unwrap();
    let other = CompoundIdentity::parse(&["a/w", "a/y"]).unwrap();
    let mut all = vec![long.clone(), short.clone(), other.clone()];
    all.sort();
    assert_eq!(all, vec![other, short, long]);
}

#[test]
fn display_lists_sorted_tags() {
    let id = CompoundIdentity::parse(&["b/y", "a/x"]).unwrap();
    assert_eq!(id.to_string(), "{a/x, b/y}");
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serde_roundtrip_as_string_array() {
    let id = CompoundIdentity::parse(&["b/y", "a/x"]).unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#"["a/x","b/y"]"#);
    let back: CompoundIdentity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn deserialize_rejects_invalid_identity() {
    let result: Result<CompoundIdentity, _> = serde_json::from_str(r#"["a/x"]"#);
    assert!(result.is_err());
}
