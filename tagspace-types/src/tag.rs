//! Qualified tags: the atomic markers compound identities are built from.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A two-part `namespace/name` marker.
///
/// Equality, hashing and ordering are structural over the pair, namespace
/// first. Serializes as the string `namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedTag {
    namespace: String,
    name: String,
}

impl QualifiedTag {
    /// Creates a tag from its two parts. Both must be non-empty.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty() || name.is_empty() {
            return Err(Error::InvalidTag(format!("{namespace}/{name}")));
        }
        Ok(Self { namespace, name })
    }

    /// Builds a tag from literal parts.
    ///
    /// # Panics
    ///
    /// Panics if either part is empty.
    #[must_use]
    pub fn from_static(namespace: &'static str, name: &'static str) -> Self {
        assert!(
            !namespace.is_empty() && !name.is_empty(),
            "qualified tag parts must be non-empty"
        );
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Parses a tag from `namespace/name`, splitting at the first `/`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((namespace, name)) => {
                Self::new(namespace, name).map_err(|_| Error::InvalidTag(s.to_string()))
            }
            None => Err(Error::InvalidTag(s.to_string())),
        }
    }

    /// Returns the namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the name part.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for QualifiedTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QualifiedTag {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for QualifiedTag {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<QualifiedTag> for String {
    fn from(tag: QualifiedTag) -> Self {
        tag.to_string()
    }
}
