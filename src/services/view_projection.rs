//! Projection of a consolidated result into render-ready view models.
//!
//! Pure data shaping: the CLI table and JSON renderers both consume
//! [`ReportView`] so they cannot drift apart.

use serde::Serialize;

use crate::domain::models::{ConsolidatedResult, Metric, MetricCategory, Severity, WebVital};

/// Opportunities shown per report; the rest exist in the raw metric
/// list for anyone who wants them.
const MAX_OPPORTUNITIES: usize = 10;

/// Everything a renderer needs to display one audit report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub url: String,
    pub platforms: Vec<String>,
    pub categories: Vec<CategoryCard>,
    pub vitals: Vec<VitalCard>,
    pub opportunities: Vec<OpportunityRow>,
}

/// One scored category with its composite score.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCard {
    pub id: &'static str,
    pub title: &'static str,
    pub score: u32,
}

/// One measured Web Vital. Unmeasured vitals are omitted, never
/// rendered as zero.
#[derive(Debug, Clone, Serialize)]
pub struct VitalCard {
    pub id: &'static str,
    pub title: &'static str,
    pub value: f64,
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub severity: Severity,
}

/// One improvement opportunity with its estimated saving.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityRow {
    pub title: String,
    pub platform: String,
    pub savings_ms: f64,
    pub severity: Severity,
}

/// Build the view for one consolidated result.
pub fn project(result: &ConsolidatedResult) -> ReportView {
    let categories = MetricCategory::SCORED
        .into_iter()
        .map(|category| CategoryCard {
            id: category.as_str(),
            title: category.title(),
            score: result.scores.get(category).unwrap_or(0),
        })
        .collect();

    let vitals = WebVital::ALL
        .into_iter()
        .filter_map(|vital| {
            result.web_vitals.get(vital).map(|value| VitalCard {
                id: vital.id(),
                title: vital.title(),
                value,
                target: vital.target(),
                unit: vital.unit(),
                severity: Severity::from_vital(value, vital.target()),
            })
        })
        .collect();

    let mut opportunities: Vec<OpportunityRow> = result
        .metrics
        .iter()
        .filter(|m| is_opportunity(m))
        .map(|m| OpportunityRow {
            title: m.title.clone(),
            platform: m.platform.clone(),
            savings_ms: m.value.unwrap_or(0.0),
            severity: m
                .severity
                .unwrap_or_else(|| Severity::from_savings_ms(m.value.unwrap_or(0.0))),
        })
        .collect();
    opportunities.sort_by(|a, b| {
        b.savings_ms
            .partial_cmp(&a.savings_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    opportunities.truncate(MAX_OPPORTUNITIES);

    ReportView {
        url: result.url.clone(),
        platforms: result.platforms.clone(),
        categories,
        vitals,
        opportunities,
    }
}

/// Opportunities are performance-bucket metrics carrying a savings
/// value but no score, distinguished from plain timings by severity.
fn is_opportunity(metric: &Metric) -> bool {
    metric.category == MetricCategory::Performance
        && metric.score.is_none()
        && metric.severity.is_some()
        && metric.value.is_some()
}
