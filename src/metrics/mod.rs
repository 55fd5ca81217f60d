pub mod bus_factor;
pub mod correctness;
pub mod license;
pub mod pinning;
pub mod ramp_up;
pub mod responsiveness;
pub mod review;

use crate::error::{Result, ScoreError};
use crate::types::scoring::{MetricKind, MetricResult};
use crate::types::signals::RepositorySignals;
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSet {
    pub bus_factor: MetricResult,
    pub responsiveness: MetricResult,
    pub correctness: MetricResult,
    pub ramp_up: MetricResult,
    pub license: MetricResult,
    pub pinning: MetricResult,
    pub review: MetricResult,
}

impl MetricSet {
    pub fn get(&self, kind: MetricKind) -> MetricResult {
        match kind {
            MetricKind::BusFactor => self.bus_factor,
            MetricKind::Responsiveness => self.responsiveness,
            MetricKind::Correctness => self.correctness,
            MetricKind::RampUp => self.ramp_up,
            MetricKind::License => self.license,
            MetricKind::DependencyPinning => self.pinning,
            MetricKind::CodeReview => self.review,
        }
    }

    fn from_computed(computed: Vec<(MetricKind, MetricResult)>) -> Result<Self> {
        let find = |kind: MetricKind| {
            computed
                .iter()
                .find(|(computed_kind, _)| *computed_kind == kind)
                .map(|(_, result)| *result)
                .ok_or_else(|| ScoreError::Metric {
                    metric: kind.name(),
                    reason: "not computed".to_string(),
                })
        };
        Ok(Self {
            bus_factor: find(MetricKind::BusFactor)?,
            responsiveness: find(MetricKind::Responsiveness)?,
            correctness: find(MetricKind::Correctness)?,
            ramp_up: find(MetricKind::RampUp)?,
            license: find(MetricKind::License)?,
            pinning: find(MetricKind::DependencyPinning)?,
            review: find(MetricKind::CodeReview)?,
        })
    }
}

pub fn compute(kind: MetricKind, signals: &RepositorySignals) -> Result<MetricResult> {
    let result = match kind {
        MetricKind::BusFactor => bus_factor::bus_factor(&signals.contributors),
        MetricKind::Responsiveness => {
            responsiveness::responsiveness(&signals.issues.close_durations)
        }
        MetricKind::Correctness => correctness::correctness(&signals.issues),
        MetricKind::RampUp => ramp_up::ramp_up(signals.readme.as_deref())?,
        MetricKind::License => license::license(signals.license.as_deref()),
        MetricKind::DependencyPinning => pinning::pinning(signals.manifest.as_ref()),
        MetricKind::CodeReview => review::review(&signals.reviews),
    };
    debug!(metric = kind.name(), value = result.value, "computed metric");
    Ok(result)
}

pub fn compute_metrics(signals: &RepositorySignals) -> Result<MetricSet> {
    let computed = MetricKind::ALL
        .par_iter()
        .map(|kind| compute(*kind, signals).map(|result| (*kind, result)))
        .collect::<Result<Vec<_>>>()?;
    MetricSet::from_computed(computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::signals::{ContributorLedger, IssueLedger, ReviewStats};

    fn signals() -> RepositorySignals {
        RepositorySignals {
            readme: Some("Installation and Usage".to_string()),
            license: Some("MIT".to_string()),
            manifest: None,
            contributors: [("a", 3u64)].into_iter().collect::<ContributorLedger>(),
            issues: IssueLedger {
                open: 1,
                closed: 3,
                close_durations: vec![0.0, 0.0, 0.0],
            },
            reviews: ReviewStats::Unavailable,
        }
    }

    #[test]
    fn computes_all_seven_metrics() {
        let set = compute_metrics(&signals()).expect("metrics should compute");
        assert_eq!(set.bus_factor.value, 1.0);
        assert_eq!(set.responsiveness.value, 1.0);
        assert_eq!(set.correctness.value, 0.75);
        assert!((set.ramp_up.value - 0.4).abs() < 1e-9);
        assert_eq!(set.license.value, 1.0);
        assert_eq!(set.pinning.value, 1.0);
        assert_eq!(set.review.value, 0.0);
        for kind in MetricKind::ALL {
            assert!((0.0..=1.0).contains(&set.get(kind).value));
        }
    }

    #[test]
    fn one_failing_metric_fails_the_set() {
        let mut signals = signals();
        signals.readme = None;
        let err = compute_metrics(&signals).expect_err("missing readme should fail");
        assert!(matches!(err, ScoreError::Metric { metric: "ramp_up", .. }));
    }
}
