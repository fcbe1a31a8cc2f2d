//! Normalized metric schema shared by all provider adapters.
//!
//! Every provider maps its raw audit payload into [`Metric`] records.
//! A metric carries at least one of `value` (a raw measurement, usually
//! milliseconds) or `score` (a normalized 0-100 judgment); metrics with
//! neither are inert and ignored by consolidation.

use serde::{Deserialize, Serialize};

/// Category a metric belongs to. Mutually exclusive and exhaustive
/// for this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricCategory {
    Performance,
    Accessibility,
    Seo,
    BestPractices,
    WebVitals,
}

impl MetricCategory {
    /// Categories that participate in weighted composite scoring.
    /// `WebVitals` is excluded: vitals are selected, never averaged.
    pub const SCORED: [MetricCategory; 4] = [
        MetricCategory::Performance,
        MetricCategory::Accessibility,
        MetricCategory::Seo,
        MetricCategory::BestPractices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::Performance => "performance",
            MetricCategory::Accessibility => "accessibility",
            MetricCategory::Seo => "seo",
            MetricCategory::BestPractices => "best-practices",
            MetricCategory::WebVitals => "web-vitals",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricCategory::Performance => "Performance",
            MetricCategory::Accessibility => "Accessibility",
            MetricCategory::Seo => "SEO",
            MetricCategory::BestPractices => "Best Practices",
            MetricCategory::WebVitals => "Web Vitals",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "performance" => Some(MetricCategory::Performance),
            "accessibility" => Some(MetricCategory::Accessibility),
            "seo" => Some(MetricCategory::Seo),
            "best-practices" => Some(MetricCategory::BestPractices),
            "web-vitals" => Some(MetricCategory::WebVitals),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding, derived from value/score where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive severity from a raw 0-1 category score.
    pub fn from_raw_score(raw: f64) -> Self {
        if raw < 0.5 {
            Severity::High
        } else if raw < 0.9 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Derive severity from an opportunity's potential savings in ms.
    pub fn from_savings_ms(savings: f64) -> Self {
        if savings > 1000.0 {
            Severity::High
        } else if savings > 500.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Derive severity from a measured vital against its target.
    pub fn from_vital(value: f64, target: f64) -> Self {
        if value > target * 2.0 {
            Severity::High
        } else if value > target {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six Core Web Vitals tracked across providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebVital {
    Lcp,
    Fid,
    Cls,
    Tti,
    Si,
    Inp,
}

impl WebVital {
    /// Fixed id order used for projection and selection.
    pub const ALL: [WebVital; 6] = [
        WebVital::Lcp,
        WebVital::Fid,
        WebVital::Cls,
        WebVital::Tti,
        WebVital::Si,
        WebVital::Inp,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            WebVital::Lcp => "lcp",
            WebVital::Fid => "fid",
            WebVital::Cls => "cls",
            WebVital::Tti => "tti",
            WebVital::Si => "si",
            WebVital::Inp => "inp",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WebVital::Lcp => "Largest Contentful Paint",
            WebVital::Fid => "First Input Delay",
            WebVital::Cls => "Cumulative Layout Shift",
            WebVital::Tti => "Time to Interactive",
            WebVital::Si => "Speed Index",
            WebVital::Inp => "Interaction to Next Paint",
        }
    }

    /// Shared "good" threshold. These targets are common to all
    /// providers; adapters must not substitute their own.
    pub fn target(&self) -> f64 {
        match self {
            WebVital::Lcp => 2500.0,
            WebVital::Fid => 100.0,
            WebVital::Cls => 0.1,
            WebVital::Tti => 3800.0,
            WebVital::Si => 3400.0,
            WebVital::Inp => 200.0,
        }
    }

    /// Unit of the measured value. CLS is a unitless fraction.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            WebVital::Cls => None,
            _ => Some("ms"),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "lcp" => Some(WebVital::Lcp),
            "fid" => Some(WebVital::Fid),
            "cls" => Some(WebVital::Cls),
            "tti" => Some(WebVital::Tti),
            "si" => Some(WebVital::Si),
            "inp" => Some(WebVital::Inp),
            _ => None,
        }
    }
}

/// One normalized measurement produced by a provider adapter.
///
/// Immutable once produced: the consolidation engine only derives new
/// aggregate values, it never rewrites input metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Stable identifier, e.g. `lcp`, `performance-score`, or a
    /// provider-specific audit id.
    pub id: String,
    /// Human-readable label.
    pub title: String,
    pub category: MetricCategory,
    /// Raw measured value (usually milliseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Normalized 0-100 score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Originating provider identifier.
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference threshold used for severity derivation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// Measured value compared against `target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
}

impl Metric {
    /// A category composite score metric (e.g. `performance-score`)
    /// from a raw 0-1 provider score.
    pub fn category_score(
        category: MetricCategory,
        raw_score: f64,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}-score", category.as_str()),
            title: format!("{} Score", category.title()),
            category,
            value: None,
            score: Some(raw_score * 100.0),
            platform: platform.into(),
            severity: Some(Severity::from_raw_score(raw_score)),
            unit: Some("%".to_string()),
            target: None,
            actual: None,
        }
    }

    /// A Web Vital measurement against the shared target table.
    pub fn web_vital(vital: WebVital, value: f64, platform: impl Into<String>) -> Self {
        let target = vital.target();
        Self {
            id: vital.id().to_string(),
            title: vital.title().to_string(),
            category: MetricCategory::WebVitals,
            value: Some(value),
            score: None,
            platform: platform.into(),
            severity: Some(Severity::from_vital(value, target)),
            unit: vital.unit().map(str::to_string),
            target: Some(target),
            actual: Some(value),
        }
    }

    /// An opportunity metric with potential savings in milliseconds.
    pub fn opportunity(
        id: impl Into<String>,
        title: impl Into<String>,
        savings_ms: f64,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: MetricCategory::Performance,
            value: Some(savings_ms),
            score: None,
            platform: platform.into(),
            severity: Some(Severity::from_savings_ms(savings_ms)),
            unit: Some("ms".to_string()),
            target: None,
            actual: None,
        }
    }

    /// A value-only timing metric (no score, no severity). Inert for
    /// category scoring.
    pub fn timing(
        id: impl Into<String>,
        title: impl Into<String>,
        value_ms: f64,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: MetricCategory::Performance,
            value: Some(value_ms),
            score: None,
            platform: platform.into(),
            severity: None,
            unit: Some("ms".to_string()),
            target: None,
            actual: None,
        }
    }

    /// True when the metric carries neither a value nor a score and
    /// therefore contributes nothing to consolidation.
    pub fn is_inert(&self) -> bool {
        self.value.is_none() && self.score.is_none()
    }
}
