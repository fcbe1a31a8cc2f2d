//! Lighthouse provider adapter.
//!
//! Talks to a self-hosted Lighthouse server (e.g. a Lighthouse CI
//! instance or a headless-runner sidecar) that returns a standard
//! Lighthouse JSON report for a URL. No API key required; the endpoint
//! is configurable for non-default deployments.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Metric, MetricCategory, WebVital};
use crate::domain::ports::{FetchOutcome, MetricsProvider};
use crate::domain::models::ProviderConfig;

pub const PLATFORM: &str = "lighthouse";

const DEFAULT_ENDPOINT: &str = "http://localhost:3001/audit";

/// Lighthouse audit ids that map onto the shared Web Vitals table.
const VITAL_AUDITS: [(WebVital, &str); 6] = [
    (WebVital::Lcp, "largest-contentful-paint"),
    (WebVital::Fid, "max-potential-fid"),
    (WebVital::Cls, "cumulative-layout-shift"),
    (WebVital::Tti, "interactive"),
    (WebVital::Si, "speed-index"),
    (WebVital::Inp, "interaction-to-next-paint"),
];

#[derive(Debug, Deserialize)]
struct LighthouseReport {
    #[serde(default)]
    categories: HashMap<String, LighthouseCategory>,
    #[serde(default)]
    audits: HashMap<String, LighthouseAudit>,
}

#[derive(Debug, Deserialize)]
struct LighthouseCategory {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LighthouseAudit {
    title: Option<String>,
    #[serde(rename = "numericValue")]
    numeric_value: Option<f64>,
    details: Option<AuditDetails>,
}

#[derive(Debug, Deserialize)]
struct AuditDetails {
    #[serde(rename = "overallSavingsMs")]
    overall_savings_ms: Option<f64>,
}

/// Adapter for a self-hosted Lighthouse audit server.
#[derive(Debug, Clone)]
pub struct LighthouseProvider {
    http: Client,
}

impl LighthouseProvider {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for LighthouseProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MetricsProvider for LighthouseProvider {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn fetch_metrics(&self, url: &str, config: &ProviderConfig) -> DomainResult<FetchOutcome> {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        tracing::debug!(url, endpoint, "Requesting Lighthouse audit");

        let resp = self
            .http
            .get(endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| DomainError::request(PLATFORM, &e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::UnexpectedStatus {
                platform: PLATFORM.to_string(),
                status,
                body,
            });
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DomainError::malformed(PLATFORM, e))?;
        let report: LighthouseReport =
            serde_json::from_value(raw.clone()).map_err(|e| DomainError::malformed(PLATFORM, e))?;

        let metrics = normalize(&report);
        tracing::debug!(count = metrics.len(), "Normalized Lighthouse metrics");

        Ok(FetchOutcome::new(metrics).with_raw(raw))
    }
}

/// Map a Lighthouse report into normalized metrics: category scores,
/// Web Vitals against the shared target table, and opportunity savings.
fn normalize(report: &LighthouseReport) -> Vec<Metric> {
    let mut metrics = Vec::new();

    for (key, category) in &report.categories {
        let (Some(cat), Some(raw)) = (MetricCategory::from_str(key), category.score) else {
            continue;
        };
        if cat == MetricCategory::WebVitals {
            continue;
        }
        metrics.push(Metric::category_score(cat, raw, PLATFORM));
    }

    for (vital, audit_id) in VITAL_AUDITS {
        if let Some(value) = report
            .audits
            .get(audit_id)
            .and_then(|audit| audit.numeric_value)
        {
            metrics.push(Metric::web_vital(vital, value, PLATFORM));
        }
    }

    for (id, audit) in &report.audits {
        let Some(savings) = audit
            .details
            .as_ref()
            .and_then(|d| d.overall_savings_ms)
            .filter(|s| *s > 0.0)
        else {
            continue;
        };
        let title = audit.title.clone().unwrap_or_else(|| id.clone());
        metrics.push(Metric::opportunity(id.clone(), title, savings, PLATFORM));
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Severity;

    fn sample_report() -> LighthouseReport {
        serde_json::from_value(serde_json::json!({
            "categories": {
                "performance": { "score": 0.85 },
                "accessibility": { "score": 0.92 },
                "seo": { "score": 1.0 },
                "best-practices": { "score": 0.45 },
                "pwa": { "score": 0.5 }
            },
            "audits": {
                "largest-contentful-paint": { "title": "Largest Contentful Paint", "numericValue": 2800.0 },
                "cumulative-layout-shift": { "title": "Cumulative Layout Shift", "numericValue": 0.05 },
                "render-blocking-resources": {
                    "title": "Eliminate render-blocking resources",
                    "details": { "overallSavingsMs": 1200.0 }
                },
                "unused-css-rules": {
                    "title": "Reduce unused CSS",
                    "details": { "overallSavingsMs": 0.0 }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_category_scores() {
        let metrics = normalize(&sample_report());
        let perf = metrics
            .iter()
            .find(|m| m.id == "performance-score")
            .unwrap();
        assert_eq!(perf.score, Some(85.0));
        assert_eq!(perf.platform, "lighthouse");

        // Unknown category keys are dropped
        assert!(!metrics.iter().any(|m| m.id == "pwa-score"));

        let bp = metrics
            .iter()
            .find(|m| m.id == "best-practices-score")
            .unwrap();
        assert_eq!(bp.severity, Some(Severity::High));
    }

    #[test]
    fn test_normalize_web_vitals() {
        let metrics = normalize(&sample_report());
        let lcp = metrics.iter().find(|m| m.id == "lcp").unwrap();
        assert_eq!(lcp.value, Some(2800.0));
        assert_eq!(lcp.category, MetricCategory::WebVitals);
        assert_eq!(lcp.target, Some(2500.0));

        let cls = metrics.iter().find(|m| m.id == "cls").unwrap();
        assert_eq!(cls.value, Some(0.05));
        assert_eq!(cls.severity, Some(Severity::Low));

        // Audits absent from the report produce no vitals
        assert!(!metrics.iter().any(|m| m.id == "inp"));
    }

    #[test]
    fn test_normalize_opportunities() {
        let metrics = normalize(&sample_report());
        let opp = metrics
            .iter()
            .find(|m| m.id == "render-blocking-resources")
            .unwrap();
        assert_eq!(opp.value, Some(1200.0));
        assert_eq!(opp.severity, Some(Severity::High));
        assert_eq!(opp.category, MetricCategory::Performance);

        // Zero-savings audits are not opportunities
        assert!(!metrics.iter().any(|m| m.id == "unused-css-rules"));
    }
}
