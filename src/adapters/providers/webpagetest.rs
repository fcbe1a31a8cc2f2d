//! WebPageTest provider adapter.
//!
//! WebPageTest results are eventually consistent: `runtest.php` queues a
//! test and returns an id, and `jsonResult.php` reports status 1xx until
//! the run completes. The adapter polls at a fixed interval up to
//! `config.retries` attempts. The run is submitted with the Lighthouse
//! integration enabled so category scores land alongside the raw
//! timings.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Metric, MetricCategory, ProviderConfig, WebVital};
use crate::domain::ports::{FetchOutcome, MetricsProvider};

pub const PLATFORM: &str = "webpagetest";

const DEFAULT_ENDPOINT: &str = "https://www.webpagetest.org";

/// Delay between result polls. The overall deadline is still the
/// orchestrator's per-provider timeout.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// `median.firstView` keys that map onto the shared Web Vitals table.
/// WebPageTest has no INP measurement.
const VITAL_FIELDS: [(WebVital, &str); 5] = [
    (WebVital::Lcp, "chromeUserTiming.LargestContentfulPaint"),
    (WebVital::Fid, "maxFID"),
    (WebVital::Cls, "chromeUserTiming.CumulativeLayoutShift"),
    (WebVital::Tti, "TimeToInteractive"),
    (WebVital::Si, "SpeedIndex"),
];

/// Lighthouse-integration scores exposed in `firstView`, on a 0-1 scale.
const LIGHTHOUSE_FIELDS: [(MetricCategory, &str); 4] = [
    (MetricCategory::Performance, "lighthouse.Performance"),
    (MetricCategory::Accessibility, "lighthouse.Accessibility"),
    (MetricCategory::BestPractices, "lighthouse.BestPractices"),
    (MetricCategory::Seo, "lighthouse.SEO"),
];

/// Value-only timings worth surfacing for detail views. These carry no
/// score and are inert for category scoring.
const TIMING_FIELDS: [(&str, &str); 2] = [
    ("ttfb", "TTFB"),
    ("fully-loaded", "fullyLoaded"),
];

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "statusCode")]
    status_code: Option<u32>,
    #[serde(rename = "statusText")]
    status_text: Option<String>,
    data: Option<SubmitData>,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
    #[serde(rename = "testId")]
    test_id: String,
}

#[derive(Debug, Deserialize)]
struct ResultResponse {
    #[serde(rename = "statusCode")]
    status_code: Option<u32>,
    data: Option<ResultData>,
}

#[derive(Debug, Deserialize)]
struct ResultData {
    median: Option<MedianViews>,
}

#[derive(Debug, Deserialize)]
struct MedianViews {
    #[serde(rename = "firstView", default)]
    first_view: HashMap<String, serde_json::Value>,
}

/// Adapter for the WebPageTest API.
#[derive(Debug, Clone)]
pub struct WebPageTestProvider {
    http: Client,
}

impl WebPageTestProvider {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn submit_test(&self, base: &str, url: &str, api_key: &str) -> DomainResult<String> {
        let resp = self
            .http
            .get(format!("{base}/runtest.php"))
            .query(&[("url", url), ("k", api_key), ("f", "json"), ("lighthouse", "1")])
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

        let submit: SubmitResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::malformed(PLATFORM, e))?;

        if submit.status_code != Some(200) {
            return Err(DomainError::RequestFailed {
                platform: PLATFORM.to_string(),
                message: format!(
                    "test submission rejected: {}",
                    submit.status_text.unwrap_or_else(|| "unknown".to_string())
                ),
            });
        }

        submit
            .data
            .map(|d| d.test_id)
            .ok_or_else(|| DomainError::malformed(PLATFORM, "submission response missing test id"))
    }

    /// Poll the result endpoint until the test completes or the retry
    /// budget runs out.
    async fn poll_result(
        &self,
        base: &str,
        test_id: &str,
        retries: u32,
    ) -> DomainResult<(ResultResponse, serde_json::Value)> {
        let attempts = retries.max(1);
        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            let resp = self
                .http
                .get(format!("{base}/jsonResult.php"))
                .query(&[("test", test_id)])
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
            let result: ResultResponse = serde_json::from_value(raw.clone())
                .map_err(|e| DomainError::malformed(PLATFORM, e))?;

            match result.status_code {
                Some(200) => return Ok((result, raw)),
                Some(code) if code < 200 => {
                    tracing::debug!(test_id, attempt, code, "WebPageTest still running");
                }
                Some(code) => {
                    return Err(DomainError::RequestFailed {
                        platform: PLATFORM.to_string(),
                        message: format!("test {test_id} failed with status {code}"),
                    });
                }
                None => {
                    return Err(DomainError::malformed(
                        PLATFORM,
                        "result response missing status code",
                    ));
                }
            }
        }

        Err(DomainError::PollExhausted {
            platform: PLATFORM.to_string(),
            attempts,
        })
    }
}

impl Default for WebPageTestProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MetricsProvider for WebPageTestProvider {
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
        let base = config
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/');

        let test_id = self.submit_test(base, url, api_key).await?;
        tracing::debug!(url, test_id, "WebPageTest run submitted");

        let (result, raw) = self.poll_result(base, &test_id, config.retries).await?;

        let metrics = result
            .data
            .and_then(|d| d.median)
            .map(|m| normalize(&m.first_view))
            .unwrap_or_default();
        tracing::debug!(count = metrics.len(), "Normalized WebPageTest metrics");

        Ok(FetchOutcome::new(metrics).with_raw(raw))
    }
}

fn field_f64(view: &HashMap<String, serde_json::Value>, key: &str) -> Option<f64> {
    view.get(key).and_then(serde_json::Value::as_f64)
}

fn normalize(first_view: &HashMap<String, serde_json::Value>) -> Vec<Metric> {
    let mut metrics = Vec::new();

    for (category, key) in LIGHTHOUSE_FIELDS {
        if let Some(raw) = field_f64(first_view, key) {
            metrics.push(Metric::category_score(category, raw, PLATFORM));
        }
    }

    for (vital, key) in VITAL_FIELDS {
        if let Some(value) = field_f64(first_view, key) {
            metrics.push(Metric::web_vital(vital, value, PLATFORM));
        }
    }

    for (id, key) in TIMING_FIELDS {
        if let Some(value) = field_f64(first_view, key) {
            metrics.push(Metric::timing(id, key, value, PLATFORM));
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_first_view() -> HashMap<String, serde_json::Value> {
        serde_json::from_value(serde_json::json!({
            "chromeUserTiming.LargestContentfulPaint": 2800,
            "chromeUserTiming.CumulativeLayoutShift": 0.12,
            "SpeedIndex": 3100,
            "TTFB": 420,
            "fullyLoaded": 5200,
            "lighthouse.Performance": 0.78,
            "lighthouse.SEO": 0.91
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_vitals() {
        let metrics = normalize(&sample_first_view());

        let lcp = metrics.iter().find(|m| m.id == "lcp").unwrap();
        assert_eq!(lcp.value, Some(2800.0));
        assert_eq!(lcp.platform, "webpagetest");

        let si = metrics.iter().find(|m| m.id == "si").unwrap();
        assert_eq!(si.value, Some(3100.0));

        // No INP from WebPageTest, and no TTI in this sample
        assert!(!metrics.iter().any(|m| m.id == "inp"));
        assert!(!metrics.iter().any(|m| m.id == "tti"));
    }

    #[test]
    fn test_normalize_lighthouse_scores() {
        let metrics = normalize(&sample_first_view());
        let perf = metrics
            .iter()
            .find(|m| m.id == "performance-score")
            .unwrap();
        assert_eq!(perf.score, Some(78.0));

        let seo = metrics.iter().find(|m| m.id == "seo-score").unwrap();
        assert_eq!(seo.score, Some(91.0));
    }

    #[test]
    fn test_normalize_timings_are_inert_for_scoring() {
        let metrics = normalize(&sample_first_view());
        let ttfb = metrics.iter().find(|m| m.id == "ttfb").unwrap();
        assert_eq!(ttfb.value, Some(420.0));
        assert!(ttfb.score.is_none());
    }

    #[test]
    fn test_normalize_empty_view() {
        assert!(normalize(&HashMap::new()).is_empty());
    }
}
