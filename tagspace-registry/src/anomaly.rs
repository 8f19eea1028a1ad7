//! Rule-based anomaly detection over identities.
//!
//! The rule list is fixed data, not a constraint solver: each rule looks at
//! one identity's tags in isolation.

use crate::store::{Registry, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tagspace_model::Vocabulary;
use tagspace_types::{CompoundIdentity, QualifiedTag};

/// A single anomaly rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyRule {
    /// `a` and `b` must never appear together.
    Contradiction {
        name: String,
        a: QualifiedTag,
        b: QualifiedTag,
    },
    /// `marker` must always be accompanied by `companion`.
    MissingCompanion {
        name: String,
        marker: QualifiedTag,
        companion: QualifiedTag,
    },
}

impl AnomalyRule {
    /// The default rules, phrased in `vocabulary`'s markers.
    #[must_use]
    pub fn default_catalog(vocabulary: &Vocabulary) -> Vec<Self> {
        vec![
            Self::Contradiction {
                name: "sync-async-conflict".into(),
                a: vocabulary.sync_operation.clone(),
                b: vocabulary.async_operation.clone(),
            },
            Self::MissingCompanion {
                name: "public-without-auth".into(),
                marker: vocabulary.public.clone(),
                companion: vocabulary.requires_auth.clone(),
            },
        ]
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Contradiction { name, .. } | Self::MissingCompanion { name, .. } => name,
        }
    }

    /// True when `identity` breaks this rule.
    #[must_use]
    pub fn is_violated_by(&self, identity: &CompoundIdentity) -> bool {
        match self {
            Self::Contradiction { a, b, .. } => identity.contains(a) && identity.contains(b),
            Self::MissingCompanion {
                marker, companion, ..
            } => identity.contains(marker) && !identity.contains(companion),
        }
    }
}

/// One identity breaking one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub identity: CompoundIdentity,
    pub rule: String,
}

impl Snapshot {
    /// Every (identity, rule) pair that fires, by identity then rule order.
    #[must_use]
    pub fn anomaly_report_with(&self, rules: &[AnomalyRule]) -> Vec<Anomaly> {
        let identities: BTreeSet<&CompoundIdentity> = self.identities().collect();
        let mut report = Vec::new();
        for identity in identities {
            for rule in rules.iter().filter(|rule| rule.is_violated_by(identity)) {
                report.push(Anomaly {
                    identity: identity.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }
        report
    }

    /// [`Snapshot::anomaly_report_with`] using the default catalog.
    #[must_use]
    pub fn anomaly_report(&self) -> Vec<Anomaly> {
        self.anomaly_report_with(&AnomalyRule::default_catalog(&Vocabulary::default()))
    }

    /// Identities breaking at least one of `rules`, in canonical order.
    #[must_use]
    pub fn find_anomalies_with(&self, rules: &[AnomalyRule]) -> Vec<CompoundIdentity> {
        let mut found: Vec<CompoundIdentity> = self
            .anomaly_report_with(rules)
            .into_iter()
            .map(|anomaly| anomaly.identity)
            .collect();
        found.dedup();
        found
    }

    /// Identities breaking a default rule, in canonical order.
    #[must_use]
    pub fn find_anomalies(&self) -> Vec<CompoundIdentity> {
        self.find_anomalies_with(&AnomalyRule::default_catalog(&Vocabulary::default()))
    }
}

impl Registry {
    /// See [`Snapshot::find_anomalies`].
    #[must_use]
    pub fn find_anomalies(&self) -> Vec<CompoundIdentity> {
        self.snapshot().find_anomalies()
    }

    /// See [`Snapshot::find_anomalies_with`].
    #[must_use]
    pub fn find_anomalies_with(&self, rules: &[AnomalyRule]) -> Vec<CompoundIdentity> {
        self.snapshot().find_anomalies_with(rules)
    }

    /// See [`Snapshot::anomaly_report_with`].
    #[must_use]
    pub fn anomaly_report_with(&self, rules: &[AnomalyRule]) -> Vec<Anomaly> {
        self.snapshot().anomaly_report_with(rules)
    }
}
