//! Mock provider for testing the orchestrator and CLI plumbing.

use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Metric, ProviderConfig};
use crate::domain::ports::{FetchOutcome, MetricsProvider};

/// Canned response configuration.
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    /// Metrics returned on success.
    pub metrics: Vec<Metric>,
    /// Failure message, if the fetch should fail.
    pub error: Option<String>,
    /// Artificial latency before responding, for timeout tests.
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn success(metrics: Vec<Metric>) -> Self {
        Self {
            metrics,
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Mock provider with a fixed name and canned response.
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: &'static str,
    requires_api_key: bool,
    response: MockResponse,
}

impl MockProvider {
    pub fn new(name: &'static str, response: MockResponse) -> Self {
        Self {
            name,
            requires_api_key: false,
            response,
        }
    }

    pub fn requiring_api_key(mut self) -> Self {
        self.requires_api_key = true;
        self
    }
}

#[async_trait::async_trait]
impl MetricsProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn requires_api_key(&self) -> bool {
        self.requires_api_key
    }

    async fn fetch_metrics(
        &self,
        _url: &str,
        _config: &ProviderConfig,
    ) -> DomainResult<FetchOutcome> {
        if let Some(delay) = self.response.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.response.error {
            return Err(DomainError::RequestFailed {
                platform: self.name.to_string(),
                message: message.clone(),
            });
        }

        Ok(FetchOutcome::new(self.response.metrics.clone()))
    }
}
