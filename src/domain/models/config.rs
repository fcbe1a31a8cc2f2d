//! Typed configuration consumed by the core.
//!
//! Loading and merging live in `infrastructure::config`; the core only
//! ever sees these structs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Main configuration structure for Sitepulse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Per-provider settings, keyed by provider name.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// AI insight cache configuration.
    #[serde(default)]
    pub insights: InsightsConfig,
}

/// Per-provider settings, keyed by provider name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvidersConfig(pub HashMap<String, ProviderConfig>);

impl ProvidersConfig {
    /// Settings for one provider. Providers absent from the map are
    /// treated as disabled.
    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, config: ProviderConfig) {
        self.0.insert(name.into(), config);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProviderConfig)> {
        self.0.iter()
    }

    /// A config with no providers at all, for tests and the
    /// zero-scheduled fallback path.
    pub fn all_disabled() -> Self {
        Self(HashMap::new())
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(
            "lighthouse".to_string(),
            ProviderConfig {
                enabled: true,
                ..ProviderConfig::default()
            },
        );
        map.insert(
            "pagespeed".to_string(),
            ProviderConfig {
                enabled: true,
                ..ProviderConfig::default()
            },
        );
        map.insert("webpagetest".to_string(), ProviderConfig::default());
        Self(map)
    }
}

/// Settings for a single provider adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// Whether the orchestrator may schedule this provider at all.
    #[serde(default)]
    pub enabled: bool,

    /// API key, for providers that require one. An enabled provider
    /// missing a required key is skipped, not errored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Endpoint override (self-hosted servers, proxies, tests).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-provider fetch deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Poll attempts for eventually-consistent providers.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_retries() -> u32 {
    12
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// AI insight cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InsightsConfig {
    /// Maximum number of cached insight entries.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

const fn default_cache_capacity() -> u64 {
    10
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}
