//! Per-provider fetch outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// The outcome of one adapter's fetch attempt for one URL.
///
/// Created once per attempt by the fetch orchestrator, never mutated.
/// `error` and `metrics` are mutually exclusive in effect: when `error`
/// is set the metrics are treated as empty by the consolidation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
    pub platform: String,
    pub url: String,
    /// Instant of fetch completion.
    pub timestamp: DateTime<Utc>,
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Opaque provider payload, retained for debugging only. Never read
    /// by the consolidation engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
}

impl ProviderResult {
    pub fn success(
        platform: impl Into<String>,
        url: impl Into<String>,
        metrics: Vec<Metric>,
        raw_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
            timestamp: Utc::now(),
            metrics,
            error: None,
            raw_data,
        }
    }

    pub fn failure(
        platform: impl Into<String>,
        url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
            timestamp: Utc::now(),
            metrics: Vec::new(),
            error: Some(error.into()),
            raw_data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
