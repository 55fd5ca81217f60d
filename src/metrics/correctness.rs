use crate::types::scoring::MetricResult;
use crate::types::signals::IssueLedger;

pub fn correctness(issues: &IssueLedger) -> MetricResult {
    MetricResult::new(correctness_value(issues.open, issues.closed))
}

pub fn correctness_value(open: u64, closed: u64) -> f64 {
    let total = open + closed;
    if total == 0 {
        return 0.0;
    }
    1.0 - open as f64 / total as f64
}
