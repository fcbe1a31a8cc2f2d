//! End-to-end behavior of the consolidation engine.

mod common;

use common::{score_result, vital_result};
use sitepulse::domain::models::{Metric, MetricCategory, ProviderResult, WebVital};
use sitepulse::services::{consolidate, project};

#[test]
fn consolidation_is_deterministic() {
    let results = vec![
        score_result("lighthouse", MetricCategory::Performance, 0.71),
        score_result("pagespeed", MetricCategory::Accessibility, 0.66),
        vital_result("lighthouse", WebVital::Inp, 240.0),
    ];
    let a = consolidate(&results);
    let b = consolidate(&results);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.web_vitals, b.web_vitals);
    assert_eq!(a.platforms, b.platforms);
}

#[test]
fn failed_provider_never_influences_output() {
    let good = vec![
        score_result("lighthouse", MetricCategory::Performance, 0.85),
        vital_result("pagespeed", WebVital::Lcp, 2300.0),
    ];
    let mut with_failure = good.clone();
    with_failure.push(ProviderResult::failure(
        "webpagetest",
        "https://example.com",
        "poll budget exhausted",
    ));

    let a = consolidate(&good);
    let b = consolidate(&with_failure);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.web_vitals, b.web_vitals);
    assert_eq!(a.metrics.len(), b.metrics.len());
    assert!(!b.platforms.contains(&"webpagetest".to_string()));
}

#[test]
fn weighted_composite_matches_hand_calculation() {
    // round((85*0.5 + 87*0.3) / 0.8) = round(85.75) = 86
    let results = vec![
        score_result("lighthouse", MetricCategory::Performance, 0.85),
        score_result("pagespeed", MetricCategory::Performance, 0.87),
    ];
    assert_eq!(consolidate(&results).scores.performance, 86);
}

#[test]
fn vital_selection_follows_priority_order() {
    let results = vec![
        vital_result("webpagetest", WebVital::Lcp, 2800.0),
        vital_result("pagespeed", WebVital::Lcp, 2300.0),
    ];
    let consolidated = consolidate(&results);
    assert_eq!(consolidated.web_vitals.lcp, Some(2300.0));

    // With lighthouse present it wins regardless of input order.
    let mut with_lighthouse = results;
    with_lighthouse.push(vital_result("lighthouse", WebVital::Lcp, 2600.0));
    assert_eq!(consolidate(&with_lighthouse).web_vitals.lcp, Some(2600.0));
}

#[test]
fn vitals_are_never_fabricated() {
    let results = vec![score_result("lighthouse", MetricCategory::Performance, 0.9)];
    let consolidated = consolidate(&results);
    assert!(consolidated.web_vitals.is_empty());

    // Undefined vitals must be absent from serialized output, not zero.
    let json = serde_json::to_value(&consolidated).unwrap();
    assert_eq!(json["web_vitals"], serde_json::json!({}));
}

#[test]
fn unknown_platform_participates_at_default_weight() {
    let results = vec![
        score_result("lighthouse", MetricCategory::Seo, 0.90),
        score_result("newtool", MetricCategory::Seo, 0.60),
    ];
    // (90*0.5 + 60*0.1) / 0.6 = 85
    assert_eq!(consolidate(&results).scores.seo, 85);
}

#[test]
fn empty_input_produces_well_formed_report() {
    let consolidated = consolidate(&[]);
    assert!(consolidated.url.is_empty());
    assert!(consolidated.platforms.is_empty());
    assert_eq!(consolidated.scores.performance, 0);
    assert!(consolidated.web_vitals.is_empty());

    // Projection of the empty report still renders all four categories.
    let view = project(&consolidated);
    assert_eq!(view.categories.len(), 4);
    assert!(view.vitals.is_empty());
    assert!(view.opportunities.is_empty());
}

#[test]
fn mixed_category_metrics_land_in_their_buckets() {
    let metrics = vec![
        Metric::category_score(MetricCategory::Performance, 0.8, "lighthouse"),
        Metric::category_score(MetricCategory::Accessibility, 0.9, "lighthouse"),
        Metric::web_vital(WebVital::Cls, 0.02, "lighthouse"),
        Metric::opportunity("unused-js", "Reduce unused JavaScript", 900.0, "lighthouse"),
    ];
    let consolidated = consolidate(&[ProviderResult::success(
        "lighthouse",
        "https://example.com",
        metrics,
        None,
    )]);

    assert_eq!(consolidated.categories.performance.len(), 2);
    assert_eq!(consolidated.categories.accessibility.len(), 1);
    assert_eq!(consolidated.categories.web_vitals.len(), 1);
    assert_eq!(consolidated.scores.performance, 80);
    assert_eq!(consolidated.scores.accessibility, 90);
}
