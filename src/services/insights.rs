//! Insight context assembly and caching.
//!
//! Condenses a consolidated result into the compact text summaries an
//! analysis prompt (or a human) wants to read, plus rule-derived
//! recommendations for the high-severity findings. Contexts are cached
//! by content hash so repeated audits of an unchanged site do not
//! rebuild identical summaries.

use std::sync::Arc;

use moka::future::Cache;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::models::{
    ConsolidatedResult, InsightsConfig, Metric, MetricCategory, Severity, WebVital,
};

/// Render-ready insight material for one consolidated result.
#[derive(Debug, Clone, Serialize)]
pub struct InsightContext {
    pub url: String,
    /// One line per measured vital, e.g. `LCP: 3000ms (target 2500ms)`.
    pub web_vitals: Vec<String>,
    /// One line per scored category, e.g. `Performance: 86/100`.
    pub categories: Vec<String>,
    /// One line per top opportunity with its estimated saving.
    pub opportunities: Vec<String>,
    /// Actionable suggestions derived from high-severity findings.
    pub recommendations: Vec<String>,
}

impl InsightContext {
    /// Build the context from a consolidated result. Deterministic:
    /// the same result always produces the same context.
    pub fn from_result(result: &ConsolidatedResult) -> Self {
        let web_vitals = WebVital::ALL
            .into_iter()
            .filter_map(|vital| {
                result.web_vitals.get(vital).map(|value| {
                    let unit = vital.unit().unwrap_or("");
                    format!(
                        "{}: {}{unit} (target {}{unit})",
                        vital.title(),
                        trim_float(value),
                        trim_float(vital.target()),
                    )
                })
            })
            .collect();

        let categories = MetricCategory::SCORED
            .into_iter()
            .map(|category| {
                let score = result.scores.get(category).unwrap_or(0);
                format!("{}: {score}/100", category.title())
            })
            .collect();

        let opportunities = result
            .metrics
            .iter()
            .filter(|m| is_savings_metric(m))
            .map(|m| {
                format!(
                    "{}: save ~{}ms ({})",
                    m.title,
                    trim_float(m.value.unwrap_or(0.0)),
                    m.platform
                )
            })
            .collect();

        let recommendations = derive_recommendations(result);

        Self {
            url: result.url.clone(),
            web_vitals,
            categories,
            opportunities,
            recommendations,
        }
    }

    /// Content hash of this context, used as the cache key.
    pub fn content_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.url.as_bytes());
        for line in self
            .web_vitals
            .iter()
            .chain(&self.categories)
            .chain(&self.opportunities)
        {
            hasher.update(line.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}

fn is_savings_metric(metric: &Metric) -> bool {
    metric.category == MetricCategory::Performance
        && metric.score.is_none()
        && metric.severity.is_some()
        && metric.value.is_some()
}

/// Rule-based recommendations from high-severity findings.
fn derive_recommendations(result: &ConsolidatedResult) -> Vec<String> {
    let mut recommendations = Vec::new();

    for vital in WebVital::ALL {
        let Some(value) = result.web_vitals.get(vital) else {
            continue;
        };
        if Severity::from_vital(value, vital.target()) == Severity::High {
            recommendations.push(format!(
                "{} is more than double its target; prioritize fixing it",
                vital.title()
            ));
        }
    }

    for metric in &result.metrics {
        if is_savings_metric(metric) && metric.severity == Some(Severity::High) {
            recommendations.push(format!("Address \"{}\" first", metric.title));
        }
    }

    recommendations
}

/// Format a float without a trailing `.0` for whole numbers.
fn trim_float(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Bounded cache of built insight contexts, keyed by content hash.
#[derive(Clone)]
pub struct InsightCache {
    entries: Cache<String, Arc<InsightContext>>,
}

impl InsightCache {
    pub fn new(config: &InsightsConfig) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(config.cache_capacity.max(1))
                .build(),
        }
    }

    /// Fetch the context for `result`, building and caching it on miss.
    pub async fn get_or_build(&self, result: &ConsolidatedResult) -> Arc<InsightContext> {
        let context = InsightContext::from_result(result);
        let key = context.content_key();
        self.entries
            .get_with(key, async move { Arc::new(context) })
            .await
    }

    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
