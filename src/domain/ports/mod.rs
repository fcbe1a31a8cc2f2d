pub mod metrics_provider;

pub use metrics_provider::{FetchOutcome, MetricsProvider};
