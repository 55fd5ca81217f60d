use crate::types::scoring::MetricResult;

const DAYS_PER_YEAR: f64 = 365.0;

pub fn responsiveness(close_durations: &[f64]) -> MetricResult {
    MetricResult::new(responsiveness_value(close_durations))
}

pub fn responsiveness_value(close_durations: &[f64]) -> f64 {
    if close_durations.is_empty() {
        return 1.0;
    }
    let mean = close_durations.iter().sum::<f64>() / close_durations.len() as f64;
    (1.0 - mean / DAYS_PER_YEAR).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_healthy() {
        assert_eq!(responsiveness_value(&[]), 1.0);
    }

    #[test]
    fn year_long_mean_saturates_at_zero() {
        assert_eq!(responsiveness_value(&[365.0, 365.0, 365.0]), 0.0);
        assert_eq!(responsiveness_value(&[400.0, 400.0, 400.0]), 0.0);
    }

    #[test]
    fn half_year_mean_scores_half() {
        let value = responsiveness(&[182.5, 182.5, 182.5]).value;
        assert!((value - 0.5).abs() < 1e-9);
    }
}
