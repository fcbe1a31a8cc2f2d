//! Metrics provider port - the plugin seam for audit data sources.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Metric, ProviderConfig};

/// What a successful provider fetch produced.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Normalized metrics. May be empty: a provider can succeed while
    /// reporting nothing for a URL.
    pub metrics: Vec<Metric>,
    /// The raw provider payload, retained for debugging only.
    pub raw_data: Option<serde_json::Value>,
}

impl FetchOutcome {
    pub fn new(metrics: Vec<Metric>) -> Self {
        Self {
            metrics,
            raw_data: None,
        }
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw_data = Some(raw);
        self
    }
}

/// Trait for performance-audit provider adapters.
///
/// One implementation per external provider, registered in the
/// [`ProviderRegistry`](crate::adapters::providers::ProviderRegistry).
/// Adding a provider means adding one implementation, never editing the
/// orchestrator.
///
/// Errors returned here are recovered by the orchestrator into
/// error-bearing `ProviderResult`s; they never propagate further.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// The provider's stable identifier (`lighthouse`, `pagespeed`, ...).
    fn name(&self) -> &'static str;

    /// Whether this provider cannot be scheduled without an API key.
    fn requires_api_key(&self) -> bool {
        false
    }

    /// Fetch and normalize audit metrics for one URL.
    ///
    /// Implementations issue the provider-specific request(s), which may
    /// involve polling for eventually-consistent providers, and map the
    /// raw audit shape into normalized [`Metric`] records. Network I/O
    /// only; no persistence, no shared state.
    async fn fetch_metrics(&self, url: &str, config: &ProviderConfig) -> DomainResult<FetchOutcome>;
}
