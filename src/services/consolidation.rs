//! The consolidation engine.
//!
//! Merges normalized metrics from all successful providers into
//! per-category weighted composite scores and a single best-available
//! value per Web Vital. A total function: any input, including an empty
//! list, yields a well-formed [`ConsolidatedResult`].
//!
//! Category scores blend safely because they are already-normalized
//! 0-100 judgments. Web Vitals are measurements taken under different
//! network and device conditions; blending them would produce a
//! misleading number, so each vital is the first defined value in a
//! fixed provider priority order instead.

use chrono::Utc;

use crate::domain::models::{
    CategoryBuckets, CategoryScores, ConsolidatedResult, Metric, MetricCategory, ProviderResult,
    WebVital, WebVitalValues,
};

/// Provider priority for Web Vital selection.
pub const VITAL_PRIORITY: [&str; 3] = ["lighthouse", "pagespeed", "webpagetest"];

/// Weight given to a platform's scores during category averaging.
/// Platforms not in the table contribute at `DEFAULT_WEIGHT`.
const PLATFORM_WEIGHTS: [(&str, f64); 3] = [
    ("lighthouse", 0.5),
    ("pagespeed", 0.3),
    ("webpagetest", 0.2),
];

const DEFAULT_WEIGHT: f64 = 0.1;

pub fn platform_weight(platform: &str) -> f64 {
    PLATFORM_WEIGHTS
        .iter()
        .find(|(name, _)| *name == platform)
        .map_or(DEFAULT_WEIGHT, |(_, w)| *w)
}

/// Merge per-provider results into one consolidated result.
///
/// Results with `error` set are dropped entirely; their metrics are
/// never partially credited. `scores` and `web_vitals` depend only on
/// the surviving metric set.
pub fn consolidate(results: &[ProviderResult]) -> ConsolidatedResult {
    let survivors: Vec<&ProviderResult> = results.iter().filter(|r| r.is_ok()).collect();

    let url = survivors
        .first()
        .map(|r| r.url.clone())
        .unwrap_or_default();
    let platforms: Vec<String> = survivors.iter().map(|r| r.platform.clone()).collect();

    let metrics: Vec<Metric> = survivors
        .iter()
        .flat_map(|r| r.metrics.iter().cloned())
        .collect();

    let mut categories = CategoryBuckets::default();
    for metric in &metrics {
        categories.bucket_mut(metric.category).push(metric.clone());
    }

    let mut scores = CategoryScores::default();
    for category in MetricCategory::SCORED {
        scores.set(category, weighted_score(categories.bucket(category)));
    }

    let web_vitals = select_vitals(&categories.web_vitals);

    ConsolidatedResult {
        url,
        timestamp: Utc::now(),
        platforms,
        metrics,
        categories,
        scores,
        web_vitals,
    }
}

/// Weighted average of the scored metrics in one bucket, rounded to an
/// integer 0-100. A bucket with no scored metrics yields `0` (the
/// missing-score sentinel downstream consumers rely on).
fn weighted_score(bucket: &[Metric]) -> u32 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for metric in bucket {
        let Some(score) = metric.score else { continue };
        let weight = platform_weight(&metric.platform);
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0;
    }

    (weighted_sum / total_weight).round().clamp(0.0, 100.0) as u32
}

/// Pick one value per vital: the first provider in priority order with
/// a defined value. A vital nobody measured stays undefined.
fn select_vitals(bucket: &[Metric]) -> WebVitalValues {
    let mut vitals = WebVitalValues::default();

    for vital in WebVital::ALL {
        let selected = VITAL_PRIORITY.iter().find_map(|platform| {
            bucket
                .iter()
                .find(|m| m.id == vital.id() && m.platform == *platform && m.value.is_some())
                .and_then(|m| m.value)
        });
        if let Some(value) = selected {
            vitals.set(vital, value);
        }
    }

    vitals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProviderResult;

    fn score_result(platform: &str, category: MetricCategory, raw: f64) -> ProviderResult {
        ProviderResult::success(
            platform,
            "https://example.com",
            vec![Metric::category_score(category, raw, platform)],
            None,
        )
    }

    #[test]
    fn test_weighted_scoring_example() {
        // lighthouse 85 at 0.5, pagespeed 87 at 0.3:
        // round((85*0.5 + 87*0.3) / 0.8) = round(85.75) = 86
        let results = vec![
            score_result("lighthouse", MetricCategory::Performance, 0.85),
            score_result("pagespeed", MetricCategory::Performance, 0.87),
        ];
        let consolidated = consolidate(&results);
        assert_eq!(consolidated.scores.performance, 86);
    }

    #[test]
    fn test_unknown_platform_default_weight() {
        let results = vec![
            score_result("lighthouse", MetricCategory::Seo, 0.90),
            score_result("mysterytool", MetricCategory::Seo, 0.60),
        ];
        let consolidated = consolidate(&results);
        // (90*0.5 + 60*0.1) / 0.6 = 85
        assert_eq!(consolidated.scores.seo, 85);
        assert!(consolidated.platforms.contains(&"mysterytool".to_string()));
    }

    #[test]
    fn test_vital_fallback_order() {
        let results = vec![
            ProviderResult::success(
                "pagespeed",
                "https://example.com",
                vec![Metric::web_vital(WebVital::Lcp, 2300.0, "pagespeed")],
                None,
            ),
            ProviderResult::success(
                "webpagetest",
                "https://example.com",
                vec![Metric::web_vital(WebVital::Lcp, 2800.0, "webpagetest")],
                None,
            ),
        ];
        let consolidated = consolidate(&results);
        // lighthouse absent: pagespeed outranks webpagetest
        assert_eq!(consolidated.web_vitals.lcp, Some(2300.0));
    }

    #[test]
    fn test_vitals_never_fabricated() {
        let results = vec![score_result("lighthouse", MetricCategory::Performance, 0.8)];
        let consolidated = consolidate(&results);
        assert!(consolidated.web_vitals.is_empty());
    }

    #[test]
    fn test_unknown_platform_vitals_not_selected() {
        let results = vec![ProviderResult::success(
            "mysterytool",
            "https://example.com",
            vec![Metric::web_vital(WebVital::Lcp, 1000.0, "mysterytool")],
            None,
        )];
        let consolidated = consolidate(&results);
        // Priority list is closed; unknown platforms never supply vitals
        assert_eq!(consolidated.web_vitals.lcp, None);
    }

    #[test]
    fn test_errored_result_excluded_entirely() {
        let good = vec![
            score_result("lighthouse", MetricCategory::Performance, 0.85),
            score_result("pagespeed", MetricCategory::Performance, 0.87),
        ];
        let mut with_error = good.clone();
        with_error.push(ProviderResult::failure(
            "webpagetest",
            "https://example.com",
            "timed out",
        ));

        let a = consolidate(&good);
        let b = consolidate(&with_error);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.web_vitals, b.web_vitals);
        assert_eq!(a.platforms, b.platforms);
    }

    #[test]
    fn test_empty_input_is_well_formed() {
        let consolidated = consolidate(&[]);
        assert!(consolidated.platforms.is_empty());
        assert!(consolidated.metrics.is_empty());
        assert_eq!(consolidated.scores, CategoryScores::default());
        assert!(consolidated.web_vitals.is_empty());
    }

    #[test]
    fn test_determinism() {
        let results = vec![
            score_result("lighthouse", MetricCategory::Performance, 0.71),
            score_result("pagespeed", MetricCategory::Accessibility, 0.66),
            ProviderResult::success(
                "lighthouse",
                "https://example.com",
                vec![Metric::web_vital(WebVital::Inp, 240.0, "lighthouse")],
                None,
            ),
        ];
        let a = consolidate(&results);
        let b = consolidate(&results);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.web_vitals, b.web_vitals);
    }

    #[test]
    fn test_value_only_metrics_ignored_for_scoring() {
        let results = vec![ProviderResult::success(
            "webpagetest",
            "https://example.com",
            vec![Metric::timing("ttfb", "TTFB", 420.0, "webpagetest")],
            None,
        )];
        let consolidated = consolidate(&results);
        assert_eq!(consolidated.scores.performance, 0);
    }

    #[test]
    fn test_inert_metrics_silently_ignored() {
        let inert = Metric {
            id: "broken".to_string(),
            title: "Broken".to_string(),
            category: MetricCategory::Performance,
            value: None,
            score: None,
            platform: "lighthouse".to_string(),
            severity: None,
            unit: None,
            target: None,
            actual: None,
        };
        let results = vec![ProviderResult::success(
            "lighthouse",
            "https://example.com",
            vec![inert],
            None,
        )];
        let consolidated = consolidate(&results);
        assert_eq!(consolidated.scores.performance, 0);
        assert_eq!(consolidated.metrics.len(), 1);
    }

    #[test]
    fn test_platform_weights() {
        assert!((platform_weight("lighthouse") - 0.5).abs() < f64::EPSILON);
        assert!((platform_weight("pagespeed") - 0.3).abs() < f64::EPSILON);
        assert!((platform_weight("webpagetest") - 0.2).abs() < f64::EPSILON);
        assert!((platform_weight("anything-else") - 0.1).abs() < f64::EPSILON);
    }
}
