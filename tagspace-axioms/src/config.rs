//! Configuration for the consistency engine.

use crate::error::{AxiomError, AxiomResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tagspace_model::Vocabulary;
use tagspace_registry::AnomalyRule;
use tagspace_types::QualifiedTag;

/// Entities tagged `uses` must depend directly on an entity tagged `provides`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRule {
    pub uses: QualifiedTag,
    pub provides: QualifiedTag,
}

/// Everything the axiom catalog and anomaly rules are parameterized by.
///
/// Loadable from TOML; every section is optional.
///
/// ```toml
/// external_inputs = ["http/request"]
///
/// [vocabulary]
/// endpoint = "role/handler"
///
/// [[protocols]]
/// uses = "protocol/saml"
/// provides = "provides/saml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxiomConfig {
    pub vocabulary: Vocabulary,
    /// Context keys supplied from outside the registry.
    pub external_inputs: BTreeSet<String>,
    pub protocols: Vec<ProtocolRule>,
    /// Anomaly rules evaluated in addition to the default catalog.
    pub anomalies: Vec<AnomalyRule>,
}

impl Default for AxiomConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            external_inputs: BTreeSet::new(),
            protocols: vec![ProtocolRule {
                uses: QualifiedTag::from_static("protocol", "oauth"),
                provides: QualifiedTag::from_static("provides", "oauth"),
            }],
            anomalies: Vec::new(),
        }
    }
}

impl AxiomConfig {
    /// Parses a TOML document.
    pub fn from_toml(source: &str) -> AxiomResult<Self> {
        toml::from_str(source).map_err(|e| AxiomError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> AxiomResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| AxiomError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    /// Accepts `keys` as externally supplied context.
    #[must_use]
    pub fn with_external_inputs<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_inputs.extend(keys.into_iter().map(Into::into));
        self
    }

    /// The default anomaly catalog followed by the configured extras.
    #[must_use]
    pub fn anomaly_rules(&self) -> Vec<AnomalyRule> {
        let mut rules = AnomalyRule::default_catalog(&self.vocabulary);
        rules.extend(self.anomalies.iter().cloned());
        rules
    }
}
