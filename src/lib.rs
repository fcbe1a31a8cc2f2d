//! Sitepulse - Multi-Provider Website Performance Auditing
//!
//! Sitepulse fetches performance audits from multiple testing services
//! (Lighthouse, Google PageSpeed Insights, WebPageTest), normalizes
//! their results into a shared metric schema, and consolidates them
//! into a single report with weighted category scores and
//! best-available Web Vitals.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Metric schema, result models, provider port
//! - **Adapter Layer** (`adapters`): One adapter per external testing service
//! - **Service Layer** (`services`): Fetch orchestration, consolidation, projection, insights
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use sitepulse::adapters::providers::ProviderRegistry;
//! use sitepulse::infrastructure::ConfigLoader;
//! use sitepulse::services::{consolidate, FetchOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let orchestrator = FetchOrchestrator::new(ProviderRegistry::new());
//!     let results = orchestrator.fetch_all("https://example.com", &config).await;
//!     let report = consolidate(&results);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::providers::ProviderRegistry;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, ConsolidatedResult, LoggingConfig, Metric, MetricCategory, ProviderConfig,
    ProviderResult, Severity, WebVital,
};
pub use domain::ports::MetricsProvider;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{consolidate, FetchOrchestrator, InsightCache, ReportView};
