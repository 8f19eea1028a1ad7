use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The record stored against a compound identity.
///
/// Only `id`, `context`, `response` and `deps` carry meaning for the
/// consistency engine; everything else an application wants to keep goes in
/// `data`, whose structure the registry never inspects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// External entity id, distinguishing entries that play the same role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Data keys the entity requires, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    /// Data keys the entity produces, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<String>,
    /// Entity ids this entity structurally depends on.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub deps: BTreeSet<String>,
    /// Opaque application data.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Payload {
    /// A payload for the entity with the given id.
    pub fn entity(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// A payload carrying only application data.
    pub fn opaque(data: serde_json::Value) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Sets the required data keys.
    #[must_use]
    pub fn with_context<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the produced data keys.
    #[must_use]
    pub fn with_response<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the structural dependencies.
    #[must_use]
    pub fn with_deps<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the application data.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

impl From<serde_json::Value> for Payload {
    fn from(data: serde_json::Value) -> Self {
        Self::opaque(data)
    }
}
