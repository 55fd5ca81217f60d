use crate::types::scoring::{MetricResult, Score};
use crate::types::signals::ContributorLedger;

pub const CONTROLLING_SHARE: f64 = 0.975;

pub fn bus_factor(contributors: &ContributorLedger) -> MetricResult {
    MetricResult::new(bus_factor_value(contributors))
}

fn bus_factor_value(contributors: &ContributorLedger) -> Score {
    if contributors.is_empty() {
        return 0.0;
    }
    let threshold = contributors.total_commits() as f64 * CONTROLLING_SHARE;
    let counts = contributors.counts_descending();
    let mut running = 0u64;
    let mut consumed = 0usize;
    for commits in &counts {
        running += commits;
        consumed += 1;
        if running as f64 >= threshold {
            break;
        }
    }
    consumed as f64 / counts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_scores_zero() {
        assert_eq!(bus_factor(&ContributorLedger::default()).value, 0.0);
    }

    #[test]
    fn single_contributor_scores_one() {
        let ledger: ContributorLedger = [("solo", 42)].into_iter().collect();
        assert_eq!(bus_factor(&ledger).value, 1.0);
    }

    #[test]
    fn equal_three_way_split_consumes_everyone() {
        let ledger: ContributorLedger = [("a", 10), ("b", 10), ("c", 10)].into_iter().collect();
        assert_eq!(bus_factor(&ledger).value, 1.0);
    }

    #[test]
    fn dominant_author_needs_few_contributors() {
        let mut entries = vec![("core".to_string(), 990)];
        entries.extend((0..10).map(|i| (format!("drive-by-{i}"), 1)));
        let ledger: ContributorLedger = entries.into_iter().collect();
        let value = bus_factor(&ledger).value;
        assert!((value - 1.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn value_stays_in_unit_interval() {
        for counts in [vec![1u64], vec![5, 3, 1], vec![100, 1, 1, 1], vec![0, 0]] {
            let ledger: ContributorLedger = counts
                .iter()
                .enumerate()
                .map(|(i, commits)| (format!("dev{i}"), *commits))
                .collect();
            let value = bus_factor(&ledger).value;
            assert!((0.0..=1.0).contains(&value), "{counts:?} gave {value}");
        }
    }
}
