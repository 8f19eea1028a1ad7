//! Runs the axiom catalog over a snapshot.

use crate::axiom::{Axiom, AxiomContext, Severity, Violation};
use crate::catalog::default_axioms;
use crate::config::AxiomConfig;
use serde::Serialize;
use tagspace_registry::{Anomaly, Registry, Snapshot};
use tracing::{debug, info};

/// The outcome of [`AxiomEngine::check_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Every violation, in catalog order.
    pub violations: Vec<Violation>,
    /// Number of error-severity violations.
    pub errors: usize,
    /// Number of warning-severity violations.
    pub warnings: usize,
    /// True iff no error-severity violation exists.
    pub valid: bool,
}

impl Report {
    fn from_violations(violations: Vec<Violation>) -> Self {
        let errors = violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = violations.len() - errors;
        Self {
            violations,
            errors,
            warnings,
            valid: errors == 0,
        }
    }

    /// The violation reported by `axiom`, if any.
    #[must_use]
    pub fn violation(&self, axiom: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.axiom == axiom)
    }
}

/// Evaluates a registered list of axioms.
pub struct AxiomEngine {
    config: AxiomConfig,
    axioms: Vec<Box<dyn Axiom>>,
}

impl Default for AxiomEngine {
    fn default() -> Self {
        Self::new(AxiomConfig::default())
    }
}

impl AxiomEngine {
    /// An engine running the default catalog under `config`.
    #[must_use]
    pub fn new(config: AxiomConfig) -> Self {
        let axioms = default_axioms(&config.vocabulary);
        Self { config, axioms }
    }

    /// Appends an axiom to the catalog.
    #[must_use]
    pub fn with_axiom(mut self, axiom: Box<dyn Axiom>) -> Self {
        self.axioms.push(axiom);
        self
    }

    #[must_use]
    pub fn config(&self) -> &AxiomConfig {
        &self.config
    }

    /// Names of the registered axioms, in evaluation order.
    pub fn axiom_names(&self) -> impl Iterator<Item = &str> {
        self.axioms.iter().map(|a| a.name())
    }

    /// Runs every axiom over `snapshot`.
    #[must_use]
    pub fn check_all(&self, snapshot: &Snapshot) -> Report {
        let ctx = AxiomContext::new(snapshot, &self.config);
        let violations: Vec<Violation> = self
            .axioms
            .iter()
            .filter_map(|axiom| {
                let outcome = axiom.check(&ctx);
                debug!(
                    axiom = axiom.name(),
                    violated = outcome.is_some(),
                    "axiom checked"
                );
                outcome
            })
            .collect();

        let report = Report::from_violations(violations);
        info!(
            entities = ctx.entities.len(),
            errors = report.errors,
            warnings = report.warnings,
            valid = report.valid,
            "consistency check complete"
        );
        report
    }

    /// Runs every axiom over the registry's current snapshot.
    #[must_use]
    pub fn check_registry(&self, registry: &Registry) -> Report {
        self.check_all(&registry.snapshot())
    }

    /// Anomalies under the configured vocabulary and extra rules.
    #[must_use]
    pub fn anomalies(&self, snapshot: &Snapshot) -> Vec<Anomaly> {
        snapshot.anomaly_report_with(&self.config.anomaly_rules())
    }
}
