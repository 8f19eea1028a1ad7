//! Shared types and command implementations for the `tagspace` binary.
//!
//! A manifest is a JSON array of registry entries:
//!
//! ```json
//! [
//!   { "identity": ["entity/function", "domain/users"],
//!     "payload": { "id": "load-user", "deps": ["db"] } }
//! ]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tagspace_axioms::{topo_sort, topo_sort_by_data, AxiomConfig, AxiomEngine, Report};
use tagspace_model::Payload;
use tagspace_registry::{
    Anomaly, AspectCount, AspectSuggestion, IdentityStat, Neighbor, Registry,
};
use tagspace_types::{aspects, CompoundIdentity};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "tagspace")]
#[command(about = "Check and query a compound identity manifest")]
pub struct Cli {
    /// TOML file with vocabulary, external inputs, protocols and anomaly rules
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// JSON manifest of registry entries
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run every axiom and anomaly rule; fails when an error-severity axiom is violated
    Check,
    /// List identities carrying all of the given tags
    Query {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Tag frequencies and identity sizes
    Stats,
    /// Similar identities and tags they suggest for the given identity
    Neighbors {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Order entity ids so dependencies come first
    Order {
        /// Order by inferred data flow instead of declared deps
        #[arg(long)]
        by_data: bool,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub identity: Vec<String>,
    #[serde(default)]
    pub payload: Payload,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub report: Report,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub identities: usize,
    pub frequency: Vec<AspectCount>,
    pub sizes: Vec<IdentityStat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NeighborsOutput {
    pub neighbors: Vec<Neighbor>,
    pub suggestions: Vec<AspectSuggestion>,
}

/// What a command printed and whether it passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: Value,
    pub success: bool,
}

impl Outcome {
    fn ok(output: impl Serialize) -> Result<Self> {
        Ok(Self {
            output: serde_json::to_value(output)?,
            success: true,
        })
    }
}

/// Parses a manifest document.
pub fn parse_manifest(source: &str) -> Result<Vec<ManifestEntry>> {
    serde_json::from_str(source).context("Manifest is not a JSON array of {identity, payload}")
}

/// Registers every entry; the first invalid identity aborts the load.
pub fn load_registry(entries: Vec<ManifestEntry>) -> Result<Registry> {
    let registry = Registry::new();
    for (index, entry) in entries.into_iter().enumerate() {
        registry
            .register(entry.identity.clone(), entry.payload)
            .with_context(|| format!("Invalid manifest entry {index}: {:?}", entry.identity))?;
    }
    Ok(registry)
}

/// Reads a manifest file into a fresh registry.
pub fn load_manifest(path: &Path) -> Result<Registry> {
    info!("Loading manifest from {:?}", path);
    let source = std::fs::read_to_string(path).context("Failed to read manifest file")?;
    let registry = load_registry(parse_manifest(&source)?)?;
    debug!(entries = registry.len(), "manifest loaded");
    Ok(registry)
}

/// Reads the config file, or falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<AxiomConfig> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            AxiomConfig::load(path).context("Failed to load config")
        }
        None => Ok(AxiomConfig::default()),
    }
}

pub fn check(registry: &Registry, config: AxiomConfig) -> CheckOutput {
    let engine = AxiomEngine::new(config);
    let snapshot = registry.snapshot();
    CheckOutput {
        report: engine.check_all(&snapshot),
        anomalies: engine.anomalies(&snapshot),
    }
}

pub fn query(registry: &Registry, tags: &[String]) -> Result<Vec<CompoundIdentity>> {
    let wanted = aspects(tags).context("Invalid query tag")?;
    Ok(registry.query(&wanted))
}

pub fn stats(registry: &Registry) -> StatsOutput {
    let snapshot = registry.snapshot();
    StatsOutput {
        identities: snapshot.len(),
        frequency: snapshot.aspect_frequency(),
        sizes: snapshot.identity_stats(),
    }
}

pub fn neighbors(registry: &Registry, tags: &[String]) -> Result<NeighborsOutput> {
    let identity = CompoundIdentity::parse(tags).context("Invalid identity")?;
    let snapshot = registry.snapshot();
    Ok(NeighborsOutput {
        neighbors: snapshot.semantic_neighbors(&identity),
        suggestions: snapshot.missing_aspects(&identity),
    })
}

pub fn order(registry: &Registry, ids: &[String], by_data: bool) -> Result<Vec<String>> {
    let snapshot = registry.snapshot();
    let order = if by_data {
        topo_sort_by_data(&snapshot, ids)
    } else {
        topo_sort(&snapshot, ids)
    };
    order.context("Cannot order entities")
}

/// Loads the manifest and config named by `cli` and runs its command.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let registry = load_manifest(&cli.manifest)?;
    match &cli.command {
        Command::Check => {
            let config = load_config(cli.config.as_deref())?;
            let checked = check(&registry, config);
            let success = checked.report.valid;
            Ok(Outcome {
                output: serde_json::to_value(checked)?,
                success,
            })
        }
        Command::Query { tags } => Outcome::ok(query(&registry, tags)?),
        Command::Stats => Outcome::ok(stats(&registry)),
        Command::Neighbors { tags } => Outcome::ok(neighbors(&registry, tags)?),
        Command::Order { by_data, ids } => Outcome::ok(order(&registry, ids, *by_data)?),
    }
}
