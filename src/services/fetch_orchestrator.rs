//! Fan-out fetch orchestrator.
//!
//! Dispatches one concurrent fetch per eligible provider, bounds each
//! with its configured timeout, and converts every failure mode
//! (provider error, timeout, panic) into a [`ProviderResult`] carrying
//! an error message. Nothing a provider does can abort the run.

use std::sync::Arc;

use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::adapters::providers::ProviderRegistry;
use crate::domain::models::{
    Config, Metric, MetricCategory, ProviderConfig, ProviderResult,
};
use crate::domain::ports::MetricsProvider;

/// Platform name attached to the synthetic fallback result.
pub const FALLBACK_PLATFORM: &str = "simulated";

/// Orchestrates concurrent metric collection across providers.
pub struct FetchOrchestrator {
    registry: ProviderRegistry,
}

impl FetchOrchestrator {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Fetch metrics for `url` from every eligible provider.
    ///
    /// A provider is eligible when its config entry exists with
    /// `enabled: true` and, if the provider requires an API key, one is
    /// configured. Ineligible providers are skipped with a log line,
    /// not an error. Returns one result per dispatched provider, in
    /// registration order; if no provider was dispatched, returns a
    /// single synthetic result so downstream consolidation still has
    /// something to render.
    pub async fn fetch_all(&self, url: &str, config: &Config) -> Vec<ProviderResult> {
        let mut scheduled: Vec<(Arc<dyn MetricsProvider>, ProviderConfig)> = Vec::new();

        for provider in self.registry.providers() {
            let name = provider.name();
            let Some(provider_config) = config.providers.get(name) else {
                debug!(provider = name, "no configuration entry, skipping");
                continue;
            };
            if !provider_config.enabled {
                debug!(provider = name, "disabled, skipping");
                continue;
            }
            if provider.requires_api_key() && provider_config.api_key.is_none() {
                warn!(
                    provider = name,
                    "enabled but no API key configured, skipping"
                );
                continue;
            }
            scheduled.push((Arc::clone(provider), provider_config.clone()));
        }

        if scheduled.is_empty() {
            warn!("no providers eligible, falling back to simulated metrics");
            return vec![simulated_result(url)];
        }

        info!(
            url,
            providers = ?scheduled.iter().map(|(p, _)| p.name()).collect::<Vec<_>>(),
            "dispatching metric fetches"
        );

        let handles: Vec<_> = scheduled
            .into_iter()
            .map(|(provider, provider_config)| {
                let url = url.to_string();
                let deadline = Duration::from_secs(provider_config.timeout_secs);
                tokio::spawn(async move {
                    let name = provider.name();
                    match timeout(deadline, provider.fetch_metrics(&url, &provider_config)).await {
                        Ok(Ok(outcome)) => {
                            info!(provider = name, metrics = outcome.metrics.len(), "fetch complete");
                            ProviderResult::success(name, &url, outcome.metrics, outcome.raw_data)
                        }
                        Ok(Err(err)) => {
                            warn!(provider = name, error = %err, "fetch failed");
                            ProviderResult::failure(name, &url, err.to_string())
                        }
                        Err(_) => {
                            warn!(provider = name, timeout_secs = deadline.as_secs(), "fetch timed out");
                            ProviderResult::failure(
                                name,
                                &url,
                                format!("timed out after {}s", deadline.as_secs()),
                            )
                        }
                    }
                })
            })
            .collect();

        futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(join_err) => {
                    warn!(error = %join_err, "provider task panicked");
                    ProviderResult::failure("unknown", url, "provider task panicked")
                }
            })
            .collect()
    }
}

/// Placeholder result used when nothing real can run, so a fresh
/// install without keys still produces a rendered report.
fn simulated_result(url: &str) -> ProviderResult {
    let metrics = vec![
        Metric::category_score(MetricCategory::Performance, 0.78, FALLBACK_PLATFORM),
        Metric::category_score(MetricCategory::Accessibility, 0.88, FALLBACK_PLATFORM),
        Metric::category_score(MetricCategory::Seo, 0.85, FALLBACK_PLATFORM),
        Metric::category_score(MetricCategory::BestPractices, 0.82, FALLBACK_PLATFORM),
    ];
    ProviderResult::success(FALLBACK_PLATFORM, url, metrics, None)
}
