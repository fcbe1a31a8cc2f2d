//! Consolidated output types: one result per (URL, fetch batch).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::{Metric, MetricCategory, WebVital};

/// Metrics partitioned into the five category buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryBuckets {
    pub performance: Vec<Metric>,
    pub accessibility: Vec<Metric>,
    pub seo: Vec<Metric>,
    pub best_practices: Vec<Metric>,
    pub web_vitals: Vec<Metric>,
}

impl CategoryBuckets {
    pub fn bucket(&self, category: MetricCategory) -> &[Metric] {
        match category {
            MetricCategory::Performance => &self.performance,
            MetricCategory::Accessibility => &self.accessibility,
            MetricCategory::Seo => &self.seo,
            MetricCategory::BestPractices => &self.best_practices,
            MetricCategory::WebVitals => &self.web_vitals,
        }
    }

    pub fn bucket_mut(&mut self, category: MetricCategory) -> &mut Vec<Metric> {
        match category {
            MetricCategory::Performance => &mut self.performance,
            MetricCategory::Accessibility => &mut self.accessibility,
            MetricCategory::Seo => &mut self.seo,
            MetricCategory::BestPractices => &mut self.best_practices,
            MetricCategory::WebVitals => &mut self.web_vitals,
        }
    }
}

/// One weighted composite 0-100 per non-vital category.
///
/// A category with no scored metrics consolidates to `0`. Downstream
/// consumers treat `0` as the missing-score sentinel, so it is kept
/// indistinguishable from a measured zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub performance: u32,
    pub accessibility: u32,
    pub seo: u32,
    pub best_practices: u32,
}

impl CategoryScores {
    pub fn get(&self, category: MetricCategory) -> Option<u32> {
        match category {
            MetricCategory::Performance => Some(self.performance),
            MetricCategory::Accessibility => Some(self.accessibility),
            MetricCategory::Seo => Some(self.seo),
            MetricCategory::BestPractices => Some(self.best_practices),
            MetricCategory::WebVitals => None,
        }
    }

    pub fn set(&mut self, category: MetricCategory, score: u32) {
        match category {
            MetricCategory::Performance => self.performance = score,
            MetricCategory::Accessibility => self.accessibility = score,
            MetricCategory::Seo => self.seo = score,
            MetricCategory::BestPractices => self.best_practices = score,
            MetricCategory::WebVitals => {}
        }
    }
}

/// One selected value per vital id. A vital no provider measured stays
/// `None`; it is never interpolated or zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WebVitalValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cls: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tti: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inp: Option<f64>,
}

impl WebVitalValues {
    pub fn get(&self, vital: WebVital) -> Option<f64> {
        match vital {
            WebVital::Lcp => self.lcp,
            WebVital::Fid => self.fid,
            WebVital::Cls => self.cls,
            WebVital::Tti => self.tti,
            WebVital::Si => self.si,
            WebVital::Inp => self.inp,
        }
    }

    pub fn set(&mut self, vital: WebVital, value: f64) {
        match vital {
            WebVital::Lcp => self.lcp = Some(value),
            WebVital::Fid => self.fid = Some(value),
            WebVital::Cls => self.cls = Some(value),
            WebVital::Tti => self.tti = Some(value),
            WebVital::Si => self.si = Some(value),
            WebVital::Inp => self.inp = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        WebVital::ALL.iter().all(|v| self.get(*v).is_none())
    }
}

/// The consolidation engine's output.
///
/// `scores` and `web_vitals` are pure deterministic functions of
/// `metrics`; `timestamp` reflects consolidation time, not any one
/// provider's fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    /// Providers that contributed successfully, in contribution order.
    /// Order is an audit trail only; no consumer may depend on it.
    pub platforms: Vec<String>,
    /// Union of all metrics from successful providers.
    pub metrics: Vec<Metric>,
    pub categories: CategoryBuckets,
    pub scores: CategoryScores,
    pub web_vitals: WebVitalValues,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vital_values_get_set() {
        let mut vitals = WebVitalValues::default();
        assert!(vitals.is_empty());

        vitals.set(WebVital::Lcp, 2300.0);
        assert_eq!(vitals.get(WebVital::Lcp), Some(2300.0));
        assert_eq!(vitals.get(WebVital::Inp), None);
        assert!(!vitals.is_empty());
    }

    #[test]
    fn test_scores_web_vitals_not_scored() {
        let scores = CategoryScores::default();
        assert_eq!(scores.get(MetricCategory::WebVitals), None);
        assert_eq!(scores.get(MetricCategory::Performance), Some(0));
    }

    #[test]
    fn test_undefined_vitals_omitted_from_json() {
        let vitals = WebVitalValues {
            lcp: Some(2100.0),
            ..Default::default()
        };
        let json = serde_json::to_value(vitals).unwrap();
        assert!(json.get("lcp").is_some());
        assert!(json.get("fid").is_none());
        assert!(json.get("cls").is_none());
    }
}
