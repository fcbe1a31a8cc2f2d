//! Google PageSpeed Insights provider adapter.
//!
//! Calls the PSI v5 `runPagespeed` API, which wraps a hosted Lighthouse
//! run plus CrUX field data. Requires an API key. The lab audit shapes
//! are deliberately mapped here independently of the Lighthouse adapter:
//! the two payloads drift apart in practice and each adapter owns its
//! own raw models.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Metric, MetricCategory, ProviderConfig, WebVital};
use crate::domain::ports::{FetchOutcome, MetricsProvider};

pub const PLATFORM: &str = "pagespeed";

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// PSI lab audit ids that map onto the shared Web Vitals table.
const VITAL_AUDITS: [(WebVital, &str); 6] = [
    (WebVital::Lcp, "largest-contentful-paint"),
    (WebVital::Fid, "max-potential-fid"),
    (WebVital::Cls, "cumulative-layout-shift"),
    (WebVital::Tti, "interactive"),
    (WebVital::Si, "speed-index"),
    (WebVital::Inp, "interaction-to-next-paint"),
];

#[derive(Debug, Deserialize)]
struct PsiResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<PsiLighthouseResult>,
    #[serde(rename = "loadingExperience")]
    loading_experience: Option<PsiLoadingExperience>,
}

#[derive(Debug, Deserialize)]
struct PsiLighthouseResult {
    #[serde(default)]
    categories: HashMap<String, PsiCategory>,
    #[serde(default)]
    audits: HashMap<String, PsiAudit>,
}

#[derive(Debug, Deserialize)]
struct PsiCategory {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PsiAudit {
    title: Option<String>,
    #[serde(rename = "numericValue")]
    numeric_value: Option<f64>,
    details: Option<PsiAuditDetails>,
}

#[derive(Debug, Deserialize)]
struct PsiAuditDetails {
    #[serde(rename = "overallSavingsMs")]
    overall_savings_ms: Option<f64>,
}

/// CrUX field data attached to a PSI response.
#[derive(Debug, Deserialize)]
struct PsiLoadingExperience {
    #[serde(default)]
    metrics: HashMap<String, PsiFieldMetric>,
}

#[derive(Debug, Deserialize)]
struct PsiFieldMetric {
    percentile: Option<f64>,
}

/// Adapter for the Google PageSpeed Insights v5 API.
#[derive(Debug, Clone)]
pub struct PageSpeedProvider {
    http: Client,
}

impl PageSpeedProvider {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for PageSpeedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MetricsProvider for PageSpeedProvider {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn fetch_metrics(&self, url: &str, config: &ProviderConfig) -> DomainResult<FetchOutcome> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::MissingApiKey(PLATFORM.to_string()))?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        tracing::debug!(url, "Requesting PageSpeed Insights audit");

        let resp = self
            .http
            .get(endpoint)
            .query(&[
                ("url", url),
                ("key", api_key),
                ("strategy", "mobile"),
                ("category", "performance"),
                ("category", "accessibility"),
                ("category", "best-practices"),
                ("category", "seo"),
            ])
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
        let parsed: PsiResponse =
            serde_json::from_value(raw.clone()).map_err(|e| DomainError::malformed(PLATFORM, e))?;

        let metrics = normalize(&parsed);
        tracing::debug!(count = metrics.len(), "Normalized PageSpeed metrics");

        Ok(FetchOutcome::new(metrics).with_raw(raw))
    }
}

fn normalize(response: &PsiResponse) -> Vec<Metric> {
    let mut metrics = Vec::new();

    if let Some(lab) = &response.lighthouse_result {
        for (key, category) in &lab.categories {
            let (Some(cat), Some(raw)) = (MetricCategory::from_str(key), category.score) else {
                continue;
            };
            if cat == MetricCategory::WebVitals {
                continue;
            }
            metrics.push(Metric::category_score(cat, raw, PLATFORM));
        }

        for (vital, audit_id) in VITAL_AUDITS {
            if let Some(value) = lab.audits.get(audit_id).and_then(|a| a.numeric_value) {
                metrics.push(Metric::web_vital(vital, value, PLATFORM));
            }
        }

        for (id, audit) in &lab.audits {
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
    }

    // CrUX field data fills vitals the lab run cannot measure. INP in
    // particular only exists as field data.
    if let Some(field) = &response.loading_experience {
        let has_vital = |metrics: &[Metric], id: &str| metrics.iter().any(|m| m.id == id);

        if !has_vital(&metrics, "inp") {
            if let Some(p) = field
                .metrics
                .get("INTERACTION_TO_NEXT_PAINT")
                .and_then(|m| m.percentile)
            {
                metrics.push(Metric::web_vital(WebVital::Inp, p, PLATFORM));
            }
        }
        if !has_vital(&metrics, "cls") {
            // CrUX reports CLS percentile scaled by 100.
            if let Some(p) = field
                .metrics
                .get("CUMULATIVE_LAYOUT_SHIFT_SCORE")
                .and_then(|m| m.percentile)
            {
                metrics.push(Metric::web_vital(WebVital::Cls, p / 100.0, PLATFORM));
            }
        }
    }

    metrics
}
