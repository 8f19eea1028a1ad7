//! Compound identities: validated sets of qualified tags.

use crate::validate::{validate, IdentityViolation, MIN_IDENTITY_SIZE};
use crate::{Error, QualifiedTag, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A set of at least two qualified tags, keying one registry entry.
///
/// Tags are held sorted, so iteration order is canonical. Identities order
/// lexicographically by their sorted tag sequence (first differing tag, a
/// strict prefix sorts first), which is the tie-break used by every
/// deterministic output in tagspace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CompoundIdentity(BTreeSet<QualifiedTag>);

impl CompoundIdentity {
    /// Builds an identity from already-qualified tags.
    pub fn new(tags: impl IntoIterator<Item = QualifiedTag>) -> Result<Self> {
        let mut set = BTreeSet::new();
        for tag in tags {
            if let Some(dup) = set.replace(tag) {
                return Err(Error::InvalidIdentity(IdentityViolation::NotASet {
                    duplicate: dup.to_string(),
                }));
            }
        }
        if set.len() < MIN_IDENTITY_SIZE {
            return Err(Error::InvalidIdentity(IdentityViolation::TooFewElements {
                count: set.len(),
            }));
        }
        Ok(Self(set))
    }

    /// Parses and validates raw `namespace/name` strings.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        validate(raw).map_err(Error::InvalidIdentity)?;
        let tags = raw
            .iter()
            .map(|s| QualifiedTag::parse(s.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self(tags))
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: identities hold at least two tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates tags in canonical order.
    pub fn tags(&self) -> impl Iterator<Item = &QualifiedTag> {
        self.0.iter()
    }

    /// Borrows the underlying tag set.
    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<QualifiedTag> {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, tag: &QualifiedTag) -> bool {
        self.0.contains(tag)
    }

    /// True when every tag of `aspects` is in this identity.
    #[must_use]
    pub fn is_superset_of(&self, aspects: &BTreeSet<QualifiedTag>) -> bool {
        self.0.is_superset(aspects)
    }

    /// True when this identity shares no tag with `other`.
    #[must_use]
    pub fn is_disjoint_from(&self, other: &BTreeSet<QualifiedTag>) -> bool {
        self.0.is_disjoint(other)
    }

    /// Tags as `namespace/name` strings, in canonical order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for CompoundIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str("}")
    }
}

impl TryFrom<Vec<String>> for CompoundIdentity {
    type Error = Error;

    fn try_from(raw: Vec<String>) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl TryFrom<&[&str]> for CompoundIdentity {
    type Error = Error;

    fn try_from(raw: &[&str]) -> Result<Self> {
        Self::parse(raw)
    }
}

impl<const N: usize> TryFrom<[&str; N]> for CompoundIdentity {
    type Error = Error;

    fn try_from(raw: [&str; N]) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl TryFrom<BTreeSet<QualifiedTag>> for CompoundIdentity {
    type Error = Error;

    fn try_from(tags: BTreeSet<QualifiedTag>) -> Result<Self> {
        Self::new(tags)
    }
}

impl From<CompoundIdentity> for Vec<String> {
    fn from(identity: CompoundIdentity) -> Self {
        identity.to_strings()
    }
}

/// Builds a query aspect set from raw `namespace/name` strings.
///
/// Unlike an identity, an aspect set may hold a single tag; duplicates
/// collapse. Every element must still be qualified.
pub fn aspects<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Result<BTreeSet<QualifiedTag>> {
    raw.into_iter()
        .map(|s| QualifiedTag::parse(s.as_ref()))
        .collect()
}
