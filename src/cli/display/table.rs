//! Table builder wrapper around comfy-table for consistent display.

use colored::Colorize;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::domain::models::Severity;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
/// Respects NO_COLOR env var via comfy-table's built-in support.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Colorize a 0-100 composite score using the Lighthouse bands.
pub fn colored_score(score: u32) -> String {
    let text = format!("{score}");
    if score >= 90 {
        text.green().to_string()
    } else if score >= 50 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Colorize a severity label.
pub fn colored_severity(severity: Severity) -> String {
    match severity {
        Severity::High => severity.as_str().red().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::Low => severity.as_str().green().to_string(),
    }
}

/// Render a section heading.
pub fn section(title: &str) -> String {
    format!("\n{}", title.bold())
}
