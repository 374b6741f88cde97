use crate::{LatencyBudget, LatencySample};

use wi_config::PerformanceConfig;

use std::time::Duration;

use googletest::prelude::*;
use proptest::prelude::*;

fn millis(values: impl IntoIterator<Item = u64>) -> LatencySample {
    values.into_iter().map(Duration::from_millis).collect()
}

#[test]
fn given_empty_sample_when_p95_requested_then_none() {
    assert_that!(LatencySample::new().p95(), none());
}

#[test]
fn given_hundred_samples_when_p95_computed_then_ninety_fifth_value() {
    // Given
    let sample = millis(1..=100);

    // When
    let p95 = sample.p95();

    // Then
    assert_that!(p95, some(eq(Duration::from_millis(95))));
}

#[test]
fn given_twenty_samples_when_p95_computed_then_nineteenth_value() {
    // ceil(0.95 * 20) = 19
    let sample = millis((1..=20).rev());
    assert_that!(sample.p95(), some(eq(Duration::from_millis(19))));
}

#[test]
fn given_single_sample_when_percentiles_computed_then_that_sample() {
    let sample = millis([42]);
    assert_that!(sample.percentile(0.0), some(eq(Duration::from_millis(42))));
    assert_that!(sample.percentile(100.0), some(eq(Duration::from_millis(42))));
}

#[test]
fn given_out_of_range_percentile_when_requested_then_none() {
    assert_that!(millis([1, 2, 3]).percentile(101.0), none());
}

#[test]
fn given_p95_equal_to_budget_when_checked_then_violation() {
    let budget = LatencyBudget::new(Duration::from_millis(95), 100);
    assert_that!(budget.violation(&millis(1..=100)), some(anything()));
}

#[test]
fn given_p95_under_budget_when_checked_then_no_violation() {
    let budget = LatencyBudget::new(Duration::from_millis(96), 100);
    assert_that!(budget.violation(&millis(1..=100)), none());
}

#[test]
fn given_no_samples_when_checked_then_violation() {
    assert_that!(
        LatencyBudget::default().violation(&LatencySample::new()),
        some(contains_substring("no latency samples"))
    );
}

#[test]
fn given_default_budget_then_200ms_over_100_calls() {
    let budget = LatencyBudget::default();
    assert_that!(budget.p95, eq(Duration::from_millis(200)));
    assert_that!(budget.samples, eq(100));
}

#[test]
fn given_performance_config_when_budget_built_then_values_carried() {
    let config = PerformanceConfig {
        list_p95_budget_ms: 50,
        latency_samples: 20,
    };

    let budget = LatencyBudget::from_config(&config);

    assert_that!(budget.p95, eq(Duration::from_millis(50)));
    assert_that!(budget.samples, eq(20));
}

proptest! {
    #[test]
    fn given_any_sample_when_p95_computed_then_at_least_95_percent_at_or_below(
        values in proptest::collection::vec(0u64..10_000, 1..300)
    ) {
        let sample = millis(values.clone());
        let p95 = sample.p95().unwrap();

        let at_or_below = values.iter().filter(|v| Duration::from_millis(**v) <= p95).count();
        prop_assert!(at_or_below as f64 >= 0.95 * values.len() as f64);
        prop_assert!(values.contains(&(p95.as_millis() as u64)));
    }
}
