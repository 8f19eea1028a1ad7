use serde::{Deserialize, Serialize};
use tagspace_types::QualifiedTag;

/// The marker tags anomaly rules and axioms look for.
///
/// Every field has a default, so a config file only needs to name the
/// markers a project spells differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Role marker for plain functions.
    pub function: QualifiedTag,
    /// Role marker for foundation components.
    pub component: QualifiedTag,
    /// Role marker for externally reachable entry points.
    pub endpoint: QualifiedTag,
    /// Tier every component is expected to carry.
    pub component_tier: QualifiedTag,
    /// Tier every endpoint is expected to carry.
    pub endpoint_tier: QualifiedTag,
    pub sync_operation: QualifiedTag,
    pub async_operation: QualifiedTag,
    /// Marks an identity as publicly reachable.
    pub public: QualifiedTag,
    /// Must accompany `public`.
    pub requires_auth: QualifiedTag,
    pub external_integration: QualifiedTag,
    /// Marks an entity free of side effects.
    pub pure: QualifiedTag,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            function: QualifiedTag::from_static("entity", "function"),
            component: QualifiedTag::from_static("entity", "component"),
            endpoint: QualifiedTag::from_static("entity", "endpoint"),
            component_tier: QualifiedTag::from_static("tier", "foundation"),
            endpoint_tier: QualifiedTag::from_static("tier", "api"),
            sync_operation: QualifiedTag::from_static("operation", "sync"),
            async_operation: QualifiedTag::from_static("operation", "async"),
            public: QualifiedTag::from_static("access", "public"),
            requires_auth: QualifiedTag::from_static("auth", "required"),
            external_integration: QualifiedTag::from_static("integration", "external"),
            pure: QualifiedTag::from_static("effect", "pure"),
        }
    }
}
