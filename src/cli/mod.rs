//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;

use clap::{Parser, Subcommand};

/// Multi-provider website performance auditing.
#[derive(Parser)]
#[command(name = "sitepulse", version, about)]
pub struct Cli {
    /// Output machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a URL across all configured providers
    Audit(commands::audit::AuditArgs),
    /// List providers and their configuration status
    Providers(commands::providers::ProvidersArgs),
}

/// Print a top-level error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": err.to_string() });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
