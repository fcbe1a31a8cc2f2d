//! `sitepulse audit` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::adapters::providers::ProviderRegistry;
use crate::cli::display::{colored_score, colored_severity, list_table, section};
use crate::cli::output::progress::{create_hidden_spinner, create_spinner};
use crate::domain::models::ProviderResult;
use crate::infrastructure::ConfigLoader;
use crate::services::{
    consolidate, project, FetchOrchestrator, InsightCache, InsightContext, ReportView,
};

#[derive(Args)]
pub struct AuditArgs {
    /// URL to audit
    pub url: String,

    /// Path to a config file (default: .sitepulse/config.yaml hierarchy)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip insight generation
    #[arg(long)]
    pub no_insights: bool,
}

pub async fn execute(args: AuditArgs, json: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    crate::infrastructure::logging::init(&config.logging)?;

    let spinner = if json {
        create_hidden_spinner()
    } else {
        create_spinner()
    };
    spinner.set_message(format!("Auditing {}", args.url));

    let orchestrator = FetchOrchestrator::new(ProviderRegistry::new());
    let results = orchestrator.fetch_all(&args.url, &config).await;

    spinner.set_message("Consolidating results");
    let consolidated = consolidate(&results);
    let view = project(&consolidated);

    let insights = if args.no_insights {
        None
    } else {
        let cache = InsightCache::new(&config.insights);
        Some(cache.get_or_build(&consolidated).await)
    };

    spinner.finish_and_clear();

    if json {
        let payload = serde_json::json!({
            "report": view,
            "insights": insights.as_deref(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_report(&view, insights.as_deref(), &results_errors(&results));
    }

    Ok(())
}

fn results_errors(results: &[ProviderResult]) -> Vec<(String, String)> {
    results
        .iter()
        .filter_map(|r| r.error.as_ref().map(|e| (r.platform.clone(), e.clone())))
        .collect()
}

fn render_report(view: &ReportView, insights: Option<&InsightContext>, errors: &[(String, String)]) {
    println!("{} {}", "Report for".bold(), view.url);
    println!("Sources: {}", view.platforms.join(", "));

    println!("{}", section("Scores"));
    let mut table = list_table(&["category", "score"]);
    for card in &view.categories {
        table.add_row(vec![card.title.to_string(), colored_score(card.score)]);
    }
    println!("{table}");

    if !view.vitals.is_empty() {
        println!("{}", section("Web Vitals"));
        let mut table = list_table(&["vital", "value", "target", "status"]);
        for vital in &view.vitals {
            let unit = vital.unit.unwrap_or("");
            table.add_row(vec![
                vital.title.to_string(),
                format!("{}{unit}", vital.value),
                format!("{}{unit}", vital.target),
                colored_severity(vital.severity),
            ]);
        }
        println!("{table}");
    }

    if !view.opportunities.is_empty() {
        println!("{}", section("Opportunities"));
        let mut table = list_table(&["opportunity", "savings", "severity", "source"]);
        for opp in &view.opportunities {
            table.add_row(vec![
                opp.title.clone(),
                format!("{}ms", opp.savings_ms),
                colored_severity(opp.severity),
                opp.platform.clone(),
            ]);
        }
        println!("{table}");
    }

    if let Some(insights) = insights {
        if !insights.recommendations.is_empty() {
            println!("{}", section("Recommendations"));
            for recommendation in &insights.recommendations {
                println!("  - {recommendation}");
            }
        }
    }

    if !errors.is_empty() {
        println!("{}", section("Provider errors"));
        for (platform, error) in errors {
            println!("  {} {error}", format!("{platform}:").red());
        }
    }
}
