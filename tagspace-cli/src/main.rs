//! tagspace command-line front end
//!
//! Loads a JSON manifest of compound identities into a registry and runs one
//! command over it. Results go to stdout as JSON, logs to stderr.
//!
//! Usage:
//!   tagspace [--config tagspace.toml] manifest.json check
//!   tagspace manifest.json query entity/function domain/users
//!   tagspace manifest.json order --by-data load-user render-user
//!
//! `check` exits with status 1 when an error-severity axiom is violated.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tagspace_cli::{Cli, run};
use tracing::{Level, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let outcome = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&outcome.output)?);

    if outcome.success {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Consistency check failed");
        Ok(ExitCode::FAILURE)
    }
}
