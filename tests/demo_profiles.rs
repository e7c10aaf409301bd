use std::time::Duration;

use vahan::api::TripFeatures;
use vahan::dashboard::{Dashboard, DataSource};
use vahan::demo::{
    classify, synthesize, Bucket, Confidence, DemoSelector, DriverType, FixedClock,
    MaintenanceStatus, DEMO_CONFIDENCES, DEMO_WINDOW_MS,
};

#[test]
fn every_demo_value_produces_a_consistent_profile() {
    for value in DEMO_CONFIDENCES {
        let profile = classify(Confidence::from(value));
        let safe = profile.behavior.driver_type == DriverType::Safe;
        let healthy = matches!(
            profile.maintenance.status,
            MaintenanceStatus::Excellent | MaintenanceStatus::Good
        );
        assert_eq!(safe, healthy, "confidence {}", value);
        assert_eq!(profile.maintenance.health_breakdown.total(), 100);
    }
}

#[test]
fn repeated_requests_in_one_window_match() {
    let start = 1_760_000_000_000i64;
    let window_start = start - start.rem_euclid(DEMO_WINDOW_MS);

    let first = Dashboard::offline(FixedClock(window_start + 5), Duration::ZERO)
        .analyze_behavior(&TripFeatures::default());
    let second = Dashboard::offline(FixedClock(window_start + 7_999), Duration::ZERO)
        .analyze_behavior(&TripFeatures::default());

    assert_eq!(first.source, DataSource::Demo);
    assert_eq!(first, second);
}

#[test]
fn demo_rotation_covers_every_bucket() {
    let buckets: Vec<Bucket> = (0..DEMO_CONFIDENCES.len() as i64)
        .map(|i| DemoSelector::new(FixedClock(i * DEMO_WINDOW_MS)).select())
        .map(|c| classify(c).bucket)
        .collect();

    for bucket in [Bucket::Excellent, Bucket::Good, Bucket::Fair, Bucket::Poor] {
        assert!(buckets.contains(&bucket), "{:?} missing", bucket);
    }
}

#[test]
fn profile_json_shape() {
    let value = serde_json::to_value(classify(Confidence::from(60))).unwrap();

    assert_eq!(value["confidence"], 60);
    assert_eq!(value["bucket"], "Fair");
    assert_eq!(value["behavior"]["driver_type"], "Aggressive");
    assert_eq!(value["behavior"]["safety_rating"], "C");
    assert_eq!(value["maintenance"]["status"], "Needs Attention");
    assert_eq!(value["maintenance"]["overall_health"], 60);
    assert_eq!(value["maintenance"]["health_breakdown"]["fair"], 45);
}

#[test]
fn timeline_for_ratio_input() {
    let samples = synthesize(Confidence::from_ratio(0.8));
    let values: Vec<f64> = samples.iter().map(|s| s.confidence).collect();
    assert_eq!(values, vec![0.6, 0.64, 0.68, 0.72, 0.76, 0.8]);
}
