use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub type Score = f64;

pub const ADMISSION_THRESHOLD: Score = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    BusFactor,
    Responsiveness,
    Correctness,
    RampUp,
    License,
    DependencyPinning,
    CodeReview,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::BusFactor,
        MetricKind::Responsiveness,
        MetricKind::Correctness,
        MetricKind::RampUp,
        MetricKind::License,
        MetricKind::DependencyPinning,
        MetricKind::CodeReview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::BusFactor => "bus_factor",
            Self::Responsiveness => "responsive_maintainer",
            Self::Correctness => "correctness",
            Self::RampUp => "ramp_up",
            Self::License => "license",
            Self::DependencyPinning => "good_pinning_practice",
            Self::CodeReview => "pull_request",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunClock {
    started: Instant,
}

impl RunClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn offset_of(&self, at: Instant) -> Duration {
        at.saturating_duration_since(self.started)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    pub value: Score,
    pub completed_at: Instant,
}

impl MetricResult {
    pub fn new(value: Score) -> Self {
        Self {
            value,
            completed_at: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDataResult {
    pub url: String,
    pub net_score: Score,
    pub net_score_latency: f64,
    pub ramp_up: Score,
    pub ramp_up_latency: f64,
    pub correctness: Score,
    pub correctness_latency: f64,
    pub bus_factor: Score,
    pub bus_factor_latency: f64,
    pub responsive_maintainer: Score,
    pub responsive_maintainer_latency: f64,
    pub license: Score,
    pub license_latency: f64,
    pub good_pinning_practice: Score,
    pub good_pinning_practice_latency: f64,
    pub pull_request: Score,
    pub pull_request_latency: f64,
}

impl RepoDataResult {
    pub fn is_admissible(&self) -> bool {
        self.net_score >= ADMISSION_THRESHOLD
    }

    pub fn rounded(&self) -> Self {
        Self {
            url: self.url.clone(),
            net_score: round_to(self.net_score, 1),
            net_score_latency: round_to(self.net_score_latency, 3),
            ramp_up: round_to(self.ramp_up, 1),
            ramp_up_latency: round_to(self.ramp_up_latency, 3),
            correctness: round_to(self.correctness, 1),
            correctness_latency: round_to(self.correctness_latency, 3),
            bus_factor: round_to(self.bus_factor, 1),
            bus_factor_latency: round_to(self.bus_factor_latency, 3),
            responsive_maintainer: round_to(self.responsive_maintainer, 1),
            responsive_maintainer_latency: round_to(self.responsive_maintainer_latency, 3),
            license: round_to(self.license, 1),
            license_latency: round_to(self.license_latency, 3),
            good_pinning_practice: round_to(self.good_pinning_practice, 1),
            good_pinning_practice_latency: round_to(self.good_pinning_practice_latency, 3),
            pull_request: round_to(self.pull_request, 1),
            pull_request_latency: round_to(self.pull_request_latency, 3),
        }
    }

    pub fn metric_rows(&self) -> [(&'static str, Score, f64); 7] {
        [
            (
                MetricKind::RampUp.name(),
                self.ramp_up,
                self.ramp_up_latency,
            ),
            (
                MetricKind::Correctness.name(),
                self.correctness,
                self.correctness_latency,
            ),
            (
                MetricKind::BusFactor.name(),
                self.bus_factor,
                self.bus_factor_latency,
            ),
            (
                MetricKind::Responsiveness.name(),
                self.responsive_maintainer,
                self.responsive_maintainer_latency,
            ),
            (
                MetricKind::License.name(),
                self.license,
                self.license_latency,
            ),
            (
                MetricKind::DependencyPinning.name(),
                self.good_pinning_practice,
                self.good_pinning_practice_latency,
            ),
            (
                MetricKind::CodeReview.name(),
                self.pull_request,
                self.pull_request_latency,
            ),
        ]
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_matches_documented_precision() {
        assert_eq!(round_to(0.76, 1), 0.8);
        assert_eq!(round_to(0.74, 1), 0.7);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(0.0004, 3), 0.0);
    }

    #[test]
    fn metric_names_are_unique() {
        let mut names: Vec<&str> = MetricKind::ALL.iter().map(|kind| kind.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MetricKind::ALL.len());
    }

    #[test]
    fn run_clock_offsets_are_monotonic() {
        let clock = RunClock::start();
        let first = MetricResult::new(0.5);
        let second = MetricResult::new(0.5);
        assert!(clock.offset_of(second.completed_at) >= clock.offset_of(first.completed_at));
    }
}
