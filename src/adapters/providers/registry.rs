//! Provider registry.
//!
//! Providers are registered here once; the fetch orchestrator iterates
//! the registry and never names providers directly.

use std::sync::Arc;

use crate::domain::ports::MetricsProvider;

use super::lighthouse::LighthouseProvider;
use super::pagespeed::PageSpeedProvider;
use super::webpagetest::WebPageTestProvider;

/// Registry of available metrics providers.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn MetricsProvider>>,
}

impl ProviderRegistry {
    /// Registry with the built-in providers.
    pub fn new() -> Self {
        Self {
            providers: vec![
                Arc::new(LighthouseProvider::new()),
                Arc::new(PageSpeedProvider::new()),
                Arc::new(WebPageTestProvider::new()),
            ],
        }
    }

    /// Registry with no providers, for tests.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register an additional provider.
    pub fn with_provider(mut self, provider: Arc<dyn MetricsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(&self) -> &[Arc<dyn MetricsProvider>] {
        &self.providers
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn MetricsProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    pub fn available_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
