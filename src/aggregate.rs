use crate::metrics::MetricSet;
use crate::types::scoring::{MetricKind, RepoDataResult, RunClock, Score};
use std::time::Instant;

// Weights in `calculate_score` argument order: bus factor, responsiveness,
// correctness, ramp-up, license, pinning, review.
pub const WEIGHTS: [f64; 7] = [0.20, 0.18, 0.18, 0.14, 0.14, 0.10, 0.06];

pub fn calculate_score(
    bus_factor: Score,
    responsiveness: Score,
    correctness: Score,
    ramp_up: Score,
    license: Score,
    pinning: Score,
    review: Score,
) -> Score {
    weighted_score(
        &[
            bus_factor,
            responsiveness,
            correctness,
            ramp_up,
            license,
            pinning,
            review,
        ],
        &WEIGHTS,
    )
}

pub fn weighted_score(values: &[Score], weights: &[f64]) -> Score {
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = values
        .iter()
        .zip(weights)
        .map(|(value, weight)| value * weight)
        .sum();
    (weighted / weight_sum).clamp(0.0, 1.0)
}

pub fn aggregate(url: &str, metrics: &MetricSet, clock: &RunClock) -> RepoDataResult {
    let net_score = calculate_score(
        metrics.bus_factor.value,
        metrics.responsiveness.value,
        metrics.correctness.value,
        metrics.ramp_up.value,
        metrics.license.value,
        metrics.pinning.value,
        metrics.review.value,
    );
    let latency = |kind: MetricKind| clock.offset_of(metrics.get(kind).completed_at).as_secs_f64();
    let net_score_latency = clock.offset_of(Instant::now()).as_secs_f64();

    RepoDataResult {
        url: url.to_string(),
        net_score,
        net_score_latency,
        ramp_up: metrics.ramp_up.value,
        ramp_up_latency: latency(MetricKind::RampUp),
        correctness: metrics.correctness.value,
        correctness_latency: latency(MetricKind::Correctness),
        bus_factor: metrics.bus_factor.value,
        bus_factor_latency: latency(MetricKind::BusFactor),
        responsive_maintainer: metrics.responsiveness.value,
        responsive_maintainer_latency: latency(MetricKind::Responsiveness),
        license: metrics.license.value,
        license_latency: latency(MetricKind::License),
        good_pinning_practice: metrics.pinning.value,
        good_pinning_practice_latency: latency(MetricKind::DependencyPinning),
        pull_request: metrics.review.value,
        pull_request_latency: latency(MetricKind::CodeReview),
    }
}
