//! `sitepulse providers` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::adapters::providers::ProviderRegistry;
use crate::cli::display::list_table;
use crate::infrastructure::ConfigLoader;

#[derive(Args)]
pub struct ProvidersArgs {
    /// Path to a config file (default: .sitepulse/config.yaml hierarchy)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(args: ProvidersArgs, json: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    crate::infrastructure::logging::init(&config.logging)?;

    let registry = ProviderRegistry::new();

    if json {
        let payload: Vec<_> = registry
            .providers()
            .iter()
            .map(|provider| {
                let entry = config.providers.get(provider.name());
                serde_json::json!({
                    "name": provider.name(),
                    "enabled": entry.is_some_and(|e| e.enabled),
                    "requires_api_key": provider.requires_api_key(),
                    "api_key_configured": entry.is_some_and(|e| e.api_key.is_some()),
                    "endpoint": entry.and_then(|e| e.endpoint.clone()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut table = list_table(&["provider", "enabled", "api key", "endpoint"]);
    for provider in registry.providers() {
        let entry = config.providers.get(provider.name());
        let enabled = if entry.is_some_and(|e| e.enabled) {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        let key = if !provider.requires_api_key() {
            "not needed".to_string()
        } else if entry.is_some_and(|e| e.api_key.is_some()) {
            "configured".green().to_string()
        } else {
            "missing".red().to_string()
        };
        let endpoint = entry
            .and_then(|e| e.endpoint.clone())
            .unwrap_or_else(|| "default".to_string());
        table.add_row(vec![provider.name().to_string(), enabled, key, endpoint]);
    }
    println!("{table}");

    Ok(())
}
