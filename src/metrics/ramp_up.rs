use crate::error::{Result, ScoreError};
use crate::types::scoring::{MetricKind, MetricResult};
use regex::Regex;
use std::sync::OnceLock;

const CATEGORIES: [&str; 5] = [
    r"(?i)installation",
    r"(?i)usage",
    r"(?i)configuration",
    r"(?i)faq|help",
    r"(?i)resources",
];

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CATEGORIES
            .iter()
            .map(|pattern| Regex::new(pattern).expect("valid regex"))
            .collect()
    })
}

pub fn ramp_up(readme: Option<&str>) -> Result<MetricResult> {
    let text = readme.ok_or_else(|| ScoreError::Metric {
        metric: MetricKind::RampUp.name(),
        reason: "no README available".to_string(),
    })?;
    Ok(MetricResult::new(ramp_up_value(text)))
}

pub fn ramp_up_value(text: &str) -> f64 {
    let matched = patterns().iter().filter(|re| re.is_match(text)).count();
    matched as f64 / CATEGORIES.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_categories_score_one() {
        let text = "## Installation\n## Usage\n## Configuration\n## FAQ\n## Resources";
        assert_eq!(ramp_up_value(text), 1.0);
    }

    #[test]
    fn no_categories_score_zero() {
        assert_eq!(ramp_up_value("A tiny library."), 0.0);
    }

    #[test]
    fn two_categories_score_point_four() {
        let text = "INSTALLATION\nrun it. Need HELP? open an issue.";
        assert!((ramp_up_value(text) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn missing_readme_is_a_metric_failure() {
        let err = ramp_up(None).expect_err("missing readme should fail");
        assert!(matches!(err, ScoreError::Metric { metric: "ramp_up", .. }));
    }
}
