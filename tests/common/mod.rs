//! Shared fixtures for integration tests.
#![allow(dead_code)]

use sitepulse::domain::models::{Metric, MetricCategory, ProviderResult, WebVital};

/// A successful result carrying a single category score.
pub fn score_result(platform: &str, category: MetricCategory, raw: f64) -> ProviderResult {
    ProviderResult::success(
        platform,
        "https://example.com",
        vec![Metric::category_score(category, raw, platform)],
        None,
    )
}

/// A successful result carrying a single Web Vital measurement.
pub fn vital_result(platform: &str, vital: WebVital, value: f64) -> ProviderResult {
    ProviderResult::success(
        platform,
        "https://example.com",
        vec![Metric::web_vital(vital, value, platform)],
        None,
    )
}

/// A full Lighthouse JSON report body for HTTP fixtures.
pub fn lighthouse_report_body() -> serde_json::Value {
    serde_json::json!({
        "categories": {
            "performance": { "score": 0.85 },
            "accessibility": { "score": 0.92 },
            "seo": { "score": 0.88 },
            "best-practices": { "score": 0.79 }
        },
        "audits": {
            "largest-contentful-paint": { "title": "Largest Contentful Paint", "numericValue": 2400.0 },
            "speed-index": { "title": "Speed Index", "numericValue": 3000.0 },
            "render-blocking-resources": {
                "title": "Eliminate render-blocking resources",
                "details": { "overallSavingsMs": 650.0 }
            }
        }
    })
}
