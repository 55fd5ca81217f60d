use crate::types::scoring::MetricResult;
use crate::types::signals::ReviewStats;

pub fn review(stats: &ReviewStats) -> MetricResult {
    MetricResult::new(review_value(stats))
}

fn review_value(stats: &ReviewStats) -> f64 {
    let pulls = match stats {
        ReviewStats::Unavailable => return 0.0,
        ReviewStats::Collected { pulls, .. } => pulls,
    };
    if !pulls.iter().any(|pull| pull.reviewed) {
        return 1.0;
    }
    let total: u64 = pulls.iter().map(|pull| pull.changed_lines).sum();
    if total == 0 {
        return 1.0;
    }
    let reviewed: u64 = pulls
        .iter()
        .filter(|pull| pull.reviewed)
        .map(|pull| pull.changed_lines)
        .sum();
    reviewed as f64 / total as f64
}
