pub mod config;
pub mod consolidated;
pub mod metric;
pub mod provider;

pub use config::{Config, InsightsConfig, LoggingConfig, ProviderConfig, ProvidersConfig};
pub use consolidated::{CategoryBuckets, CategoryScores, ConsolidatedResult, WebVitalValues};
pub use metric::{Metric, MetricCategory, Severity, WebVital};
pub use provider::ProviderResult;
