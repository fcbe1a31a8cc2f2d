use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid timeout for provider '{0}': must be positive")]
    InvalidTimeout(String),

    #[error("Invalid retries for provider '{0}': cannot be 0")]
    InvalidRetries(String),

    #[error("Invalid insight cache capacity: {0}. Must be at least 1")]
    InvalidCacheCapacity(u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .sitepulse/config.yaml (project config)
    /// 3. .sitepulse/local.yaml (local overrides, optional, gitignored)
    /// 4. Environment variables (SITEPULSE_* prefix, highest priority)
    ///
    /// Configuration is project-local (pwd/.sitepulse/) so different
    /// sites on one machine can carry different keys and endpoints.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".sitepulse/config.yaml"))
            .merge(Yaml::file(".sitepulse/local.yaml"))
            .merge(Env::prefixed("SITEPULSE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        for (name, provider) in config.providers.iter() {
            if provider.timeout_secs == 0 {
                return Err(ConfigError::InvalidTimeout(name.clone()));
            }
            if provider.retries == 0 {
                return Err(ConfigError::InvalidRetries(name.clone()));
            }
        }

        if config.insights.cache_capacity == 0 {
            return Err(ConfigError::InvalidCacheCapacity(
                config.insights.cache_capacity,
            ));
        }

        Ok(())
    }
}
