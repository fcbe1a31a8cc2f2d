//! Property-based checks for the consolidation engine.

use proptest::prelude::*;

use sitepulse::domain::models::{Metric, MetricCategory, ProviderResult, WebVital};
use sitepulse::services::consolidate;

fn platform_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lighthouse".to_string()),
        Just("pagespeed".to_string()),
        Just("webpagetest".to_string()),
        "[a-z]{3,8}",
    ]
}

fn category_strategy() -> impl Strategy<Value = MetricCategory> {
    prop_oneof![
        Just(MetricCategory::Performance),
        Just(MetricCategory::Accessibility),
        Just(MetricCategory::Seo),
        Just(MetricCategory::BestPractices),
    ]
}

fn vital_strategy() -> impl Strategy<Value = WebVital> {
    prop_oneof![
        Just(WebVital::Lcp),
        Just(WebVital::Fid),
        Just(WebVital::Cls),
        Just(WebVital::Tti),
        Just(WebVital::Si),
        Just(WebVital::Inp),
    ]
}

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop_oneof![
        (platform_strategy(), category_strategy(), 0.0f64..=1.0)
            .prop_map(|(platform, category, raw)| Metric::category_score(category, raw, platform)),
        (platform_strategy(), vital_strategy(), 0.0f64..10_000.0)
            .prop_map(|(platform, vital, value)| Metric::web_vital(vital, value, platform)),
    ]
}

fn result_strategy() -> impl Strategy<Value = ProviderResult> {
    (
        platform_strategy(),
        prop::collection::vec(metric_strategy(), 0..8),
        prop::bool::ANY,
    )
        .prop_map(|(platform, metrics, failed)| {
            if failed {
                ProviderResult::failure(&platform, "https://example.com", "simulated failure")
            } else {
                ProviderResult::success(&platform, "https://example.com", metrics, None)
            }
        })
}

proptest! {
    #[test]
    fn composite_scores_stay_in_bounds(results in prop::collection::vec(result_strategy(), 0..6)) {
        let consolidated = consolidate(&results);
        for category in MetricCategory::SCORED {
            let score = consolidated.scores.get(category).unwrap();
            prop_assert!(score <= 100);
        }
    }

    #[test]
    fn consolidation_is_a_pure_function(results in prop::collection::vec(result_strategy(), 0..6)) {
        let a = consolidate(&results);
        let b = consolidate(&results);
        prop_assert_eq!(a.scores, b.scores);
        prop_assert_eq!(a.web_vitals, b.web_vitals);
        prop_assert_eq!(a.platforms, b.platforms);
        prop_assert_eq!(a.metrics.len(), b.metrics.len());
    }

    #[test]
    fn errored_results_are_equivalent_to_absent(results in prop::collection::vec(result_strategy(), 0..6)) {
        let survivors: Vec<ProviderResult> =
            results.iter().filter(|r| r.is_ok()).cloned().collect();
        let a = consolidate(&results);
        let b = consolidate(&survivors);
        prop_assert_eq!(a.scores, b.scores);
        prop_assert_eq!(a.web_vitals, b.web_vitals);
        prop_assert_eq!(a.platforms, b.platforms);
    }

    #[test]
    fn selected_vitals_come_from_input(results in prop::collection::vec(result_strategy(), 0..6)) {
        let consolidated = consolidate(&results);
        for vital in WebVital::ALL {
            if let Some(selected) = consolidated.web_vitals.get(vital) {
                let exists = results
                    .iter()
                    .filter(|r| r.is_ok())
                    .flat_map(|r| &r.metrics)
                    .any(|m| m.id == vital.id() && m.value == Some(selected));
                prop_assert!(exists, "vital {} = {} not present in any input", vital.id(), selected);
            }
        }
    }
}
