//! The built-in axiom catalog.

use crate::axiom::{Axiom, AxiomContext, Severity, Violation};
use std::collections::{BTreeMap, BTreeSet};
use tagspace_model::Vocabulary;
use tagspace_types::QualifiedTag;

/// The default catalog, in evaluation order.
#[must_use]
pub fn default_axioms(vocabulary: &Vocabulary) -> Vec<Box<dyn Axiom>> {
    vec![
        Box::new(ContextSatisfiable),
        Box::new(NoOrphanResponses),
        Box::new(NoCircularDataFlow),
        Box::new(DepsExist),
        Box::new(NoCircularDeps),
        Box::new(ExternalNeedsDependency),
        Box::new(PureHasNoDeps),
        Box::new(ProtocolDependencyRule),
        Box::new(TierPlacement::new(
            "component-tier-placement",
            vocabulary.component.clone(),
            vocabulary.component_tier.clone(),
        )),
        Box::new(TierPlacement::new(
            "endpoint-tier-placement",
            vocabulary.endpoint.clone(),
            vocabulary.endpoint_tier.clone(),
        )),
        Box::new(AllReachable),
        Box::new(UniqueEntityIds),
    ]
}

// ── Data flow ────────────────────────────────────────────────────

/// Every required context key is produced somewhere or supplied externally.
pub struct ContextSatisfiable;

impl Axiom for ContextSatisfiable {
    fn name(&self) -> &str {
        "context-satisfiable"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let produced: BTreeSet<&String> = ctx
            .snapshot
            .entries()
            .flat_map(|(_, payload)| &payload.response)
            .collect();

        let mut missing: BTreeMap<&String, BTreeSet<String>> = BTreeMap::new();
        for (identity, payload) in ctx.snapshot.entries() {
            for key in &payload.context {
                if !produced.contains(key) && !ctx.config.external_inputs.contains(key) {
                    let consumer = payload.id.clone().unwrap_or_else(|| identity.to_string());
                    missing.entry(key).or_default().insert(consumer);
                }
            }
        }

        let message = missing
            .iter()
            .map(|(key, needed_by)| {
                let needed_by: Vec<&str> = needed_by.iter().map(String::as_str).collect();
                format!("{key} (needed by {})", needed_by.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");
        let subjects = missing.into_keys().cloned().collect();
        self.violation(format!("context keys with no producer: {message}"), subjects)
    }
}

/// Every produced response key is consumed somewhere.
pub struct NoOrphanResponses;

impl Axiom for NoOrphanResponses {
    fn name(&self) -> &str {
        "no-orphan-responses"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let consumed: BTreeSet<&String> = ctx
            .snapshot
            .entries()
            .flat_map(|(_, payload)| &payload.context)
            .collect();
        let orphans: BTreeSet<&String> = ctx
            .snapshot
            .entries()
            .flat_map(|(_, payload)| &payload.response)
            .filter(|key| !consumed.contains(key))
            .collect();

        let subjects: Vec<String> = orphans.into_iter().cloned().collect();
        self.violation(
            format!("response keys nobody consumes: {}", subjects.join(", ")),
            subjects,
        )
    }
}

/// The inferred data-flow graph is acyclic.
pub struct NoCircularDataFlow;

impl Axiom for NoCircularDataFlow {
    fn name(&self) -> &str {
        "no-circular-data-flow"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let cycle = ctx.data_flow.find_cycle()?;
        self.violation(format!("data flow cycle: {}", cycle.join(" -> ")), cycle)
    }
}

// ── Structural dependencies ──────────────────────────────────────

/// Every declared dependency names a registered entity.
pub struct DepsExist;

impl Axiom for DepsExist {
    fn name(&self) -> &str {
        "deps-exist"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let dangling: Vec<String> = ctx
            .entities
            .iter()
            .flat_map(|e| {
                e.deps
                    .iter()
                    .filter(move |dep| !ctx.entities.contains(dep))
                    .map(move |dep| format!("{} -> {dep}", e.id))
            })
            .collect();
        self.violation(
            format!("dependencies on unregistered entities: {}", dangling.join(", ")),
            dangling,
        )
    }
}

/// The explicit dependency graph is acyclic.
pub struct NoCircularDeps;

impl Axiom for NoCircularDeps {
    fn name(&self) -> &str {
        "no-circular-deps"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let cycle = ctx.dependencies.find_cycle()?;
        self.violation(format!("dependency cycle: {}", cycle.join(" -> ")), cycle)
    }
}

/// External integrations go through another external integration.
pub struct ExternalNeedsDependency;

impl Axiom for ExternalNeedsDependency {
    fn name(&self) -> &str {
        "external-needs-dependency"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let marker = &ctx.config.vocabulary.external_integration;
        let offenders: Vec<String> = ctx
            .entities
            .tagged(marker)
            .filter(|e| {
                !e.deps.iter().any(|dep| {
                    *dep != e.id && ctx.entities.get(dep).is_some_and(|d| d.has(marker))
                })
            })
            .map(|e| e.id.clone())
            .collect();
        self.violation(
            format!(
                "{marker} entities without a {marker} dependency: {}",
                offenders.join(", ")
            ),
            offenders,
        )
    }
}

/// Pure entities never depend on components.
pub struct PureHasNoDeps;

impl Axiom for PureHasNoDeps {
    fn name(&self) -> &str {
        "pure-has-no-deps"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let vocabulary = &ctx.config.vocabulary;
        let offenders: Vec<String> = ctx
            .entities
            .tagged(&vocabulary.pure)
            .flat_map(|e| {
                e.deps
                    .iter()
                    .filter(move |dep| {
                        ctx.entities
                            .get(dep)
                            .is_some_and(|d| d.has(&vocabulary.component))
                    })
                    .map(move |dep| format!("{} -> {dep}", e.id))
            })
            .collect();
        self.violation(
            format!("pure entities depending on components: {}", offenders.join(", ")),
            offenders,
        )
    }
}

/// Protocol users depend on a protocol provider.
pub struct ProtocolDependencyRule;

impl Axiom for ProtocolDependencyRule {
    fn name(&self) -> &str {
        "protocol-dependency-rule"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let mut offenders = Vec::new();
        for rule in &ctx.config.protocols {
            for user in ctx.entities.tagged(&rule.uses) {
                if user.has(&rule.provides) {
                    continue;
                }
                let provided = user
                    .deps
                    .iter()
                    .any(|dep| ctx.entities.get(dep).is_some_and(|d| d.has(&rule.provides)));
                if !provided {
                    offenders.push(format!("{} needs {}", user.id, rule.provides));
                }
            }
        }
        self.violation(
            format!("protocol users without a provider: {}", offenders.join(", ")),
            offenders,
        )
    }
}

// ── Placement ────────────────────────────────────────────────────

/// Entities of one role carry the expected tier marker.
pub struct TierPlacement {
    name: &'static str,
    role: QualifiedTag,
    tier: QualifiedTag,
}

impl TierPlacement {
    #[must_use]
    pub fn new(name: &'static str, role: QualifiedTag, tier: QualifiedTag) -> Self {
        Self { name, role, tier }
    }
}

impl Axiom for TierPlacement {
    fn name(&self) -> &str {
        self.name
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let misplaced: Vec<String> = ctx
            .entities
            .tagged(&self.role)
            .filter(|e| !e.has(&self.tier))
            .map(|e| e.id.clone())
            .collect();
        self.violation(
            format!("{} entities missing {}: {}", self.role, self.tier, misplaced.join(", ")),
            misplaced,
        )
    }
}

/// Every function is reachable from some endpoint.
pub struct AllReachable;

impl Axiom for AllReachable {
    fn name(&self) -> &str {
        "all-reachable"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let vocabulary = &ctx.config.vocabulary;
        let endpoints = ctx.entities.tagged(&vocabulary.endpoint).map(|e| e.id.as_str());
        let reachable = ctx.dependencies.reachable_from(endpoints);

        let unreachable: Vec<String> = ctx
            .entities
            .tagged(&vocabulary.function)
            .filter(|e| !reachable.contains(&e.id))
            .map(|e| e.id.clone())
            .collect();
        self.violation(
            format!("functions unreachable from any endpoint: {}", unreachable.join(", ")),
            unreachable,
        )
    }
}

/// No entity id is carried by more than one identity.
pub struct UniqueEntityIds;

impl Axiom for UniqueEntityIds {
    fn name(&self) -> &str {
        "unique-entity-ids"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AxiomContext<'_>) -> Option<Violation> {
        let shared: Vec<String> = ctx
            .entities
            .iter()
            .filter(|e| e.identities > 1)
            .map(|e| e.id.clone())
            .collect();
        self.violation(
            format!("entity ids carried by several identities: {}", shared.join(", ")),
            shared,
        )
    }
}
