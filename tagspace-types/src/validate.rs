//! Well-formedness rules for candidate identities.
//!
//! A candidate is any sequence of raw tag strings. It forms a valid compound
//! identity when it is a set (no duplicates), has at least two elements, and
//! every element is a qualified `namespace/name` tag.

use crate::QualifiedTag;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Minimum number of tags in a compound identity.
pub const MIN_IDENTITY_SIZE: usize = 2;

/// The first rule a candidate identity violates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum IdentityViolation {
    /// The candidate repeats an element.
    NotASet { duplicate: String },
    /// The candidate has fewer than two elements.
    TooFewElements { count: usize },
    /// An element is missing its namespace or its name.
    UnqualifiedTag { tag: String },
}

impl IdentityViolation {
    /// Diagnostic code for tooling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotASet { .. } => "not-a-set",
            Self::TooFewElements { .. } => "too-few-elements",
            Self::UnqualifiedTag { .. } => "unqualified-tag",
        }
    }
}

impl fmt::Display for IdentityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASet { duplicate } => {
                write!(f, "{}: {duplicate:?} appears more than once", self.code())
            }
            Self::TooFewElements { count } => write!(
                f,
                "{}: {count} tag(s), at least {MIN_IDENTITY_SIZE} required",
                self.code()
            ),
            Self::UnqualifiedTag { tag } => {
                write!(f, "{}: {tag:?} is not namespace/name", self.code())
            }
        }
    }
}

/// Checks a candidate identity and returns the first violated rule.
pub fn validate<S: AsRef<str>>(candidate: &[S]) -> Result<(), IdentityViolation> {
    let mut seen = HashSet::with_capacity(candidate.len());
    for raw in candidate {
        let raw = raw.as_ref();
        if !seen.insert(raw) {
            return Err(IdentityViolation::NotASet {
                duplicate: raw.to_string(),
            });
        }
    }

    if candidate.len() < MIN_IDENTITY_SIZE {
        return Err(IdentityViolation::TooFewElements {
            count: candidate.len(),
        });
    }

    if let Some(bad) = candidate
        .iter()
        .map(AsRef::as_ref)
        .find(|raw| QualifiedTag::parse(raw).is_err())
    {
        return Err(IdentityViolation::UnqualifiedTag {
            tag: bad.to_string(),
        });
    }

    Ok(())
}

/// Returns true when the candidate is a well-formed compound identity.
#[must_use]
pub fn is_valid<S: AsRef<str>>(candidate: &[S]) -> bool {
    validate(candidate).is_ok()
}
