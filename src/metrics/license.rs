use crate::types::scoring::MetricResult;

pub fn license(name: Option<&str>) -> MetricResult {
    MetricResult::new(if name.is_some() { 1.0 } else { 0.0 })
}
