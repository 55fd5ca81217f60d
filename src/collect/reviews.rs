use super::Collector;
use crate::error::Result;
use crate::locate::RepoRef;
use crate::types::signals::{MergedPull, ReviewStats};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

// GitHub stops listing files after 3000 per pull request.
const MAX_FILE_PAGES: u32 = 30;

#[derive(Debug, Deserialize)]
struct PullSummary {
    number: u64,
    merged_at: Option<String>,
    #[serde(default)]
    requested_reviewers: Vec<serde_json::Value>,
    #[serde(default)]
    requested_teams: Vec<serde_json::Value>,
}

impl PullSummary {
    fn had_reviewer(&self) -> bool {
        !self.requested_reviewers.is_empty() || !self.requested_teams.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct PullFile {
    #[serde(default)]
    changes: u64,
}

impl Collector {
    pub fn fetch_review_stats(&self, repo: &RepoRef) -> ReviewStats {
        let merged = match self.list_merged_pulls(repo) {
            Ok(merged) => merged,
            Err(err) => {
                warn!(repo = %repo, error = %err, "pull request list unavailable");
                return ReviewStats::Unavailable;
            }
        };

        let outcomes: Vec<Option<MergedPull>> = merged
            .par_iter()
            .map(|pull| match self.changed_lines(repo, pull.number) {
                Ok(changed_lines) => Some(MergedPull {
                    number: pull.number,
                    reviewed: pull.had_reviewer(),
                    changed_lines,
                }),
                Err(err) => {
                    warn!(repo = %repo, pull = pull.number, error = %err, "skipping pull request");
                    None
                }
            })
            .collect();

        let skipped = outcomes.iter().filter(|outcome| outcome.is_none()).count();
        let pulls: Vec<MergedPull> = outcomes.into_iter().flatten().collect();
        info!(repo = %repo, merged = pulls.len(), skipped, "collected review stats");
        ReviewStats::Collected { pulls, skipped }
    }

    fn list_merged_pulls(&self, repo: &RepoRef) -> Result<Vec<PullSummary>> {
        let per_page = self.config.page_size;
        let mut merged = Vec::new();
        for page in 1..=self.config.max_pull_request_pages.max(1) {
            let url = format!(
                "{}/repos/{}/{}/pulls?state=closed&per_page={per_page}&page={page}",
                self.config.api_url, repo.owner, repo.name
            );
            let batch: Vec<PullSummary> = self.client.get_api(&url)?;
            let short_page = (batch.len() as u32) < per_page;
            merged.extend(batch.into_iter().filter(|pull| pull.merged_at.is_some()));
            if short_page {
                break;
            }
        }
        debug!(repo = %repo, merged = merged.len(), "listed merged pull requests");
        Ok(merged)
    }

    fn changed_lines(&self, repo: &RepoRef, number: u64) -> Result<u64> {
        let mut total = 0;
        for page in 1..=MAX_FILE_PAGES {
            let url = format!(
                "{}/repos/{}/{}/pulls/{number}/files?per_page=100&page={page}",
                self.config.api_url, repo.owner, repo.name
            );
            let files: Vec<PullFile> = self.client.get_api(&url)?;
            total += files.iter().map(|file| file.changes).sum::<u64>();
            if files.len() < 100 {
                break;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use crate::collect::testing::{collector, API};
    use crate::error::ScoreError;
    use crate::http::testing::FakeTransport;
    use crate::locate::RepoRef;
    use crate::types::signals::{MergedPull, ReviewStats};
    use std::sync::Arc;

    fn pulls_url(page: u32) -> String {
        format!("{API}/repos/o/r/pulls?state=closed&per_page=100&page={page}")
    }

    fn files_url(number: u64) -> String {
        format!("{API}/repos/o/r/pulls/{number}/files?per_page=100&page=1")
    }

    #[test]
    fn records_merged_pulls_with_reviewer_flags() {
        let transport = Arc::new(FakeTransport::default());
        transport.push(
            &pulls_url(1),
            200,
            r#"[
                {"number":1,"merged_at":"2024-01-01T00:00:00Z","requested_reviewers":[{"login":"rev"}]},
                {"number":2,"merged_at":"2024-01-02T00:00:00Z","requested_reviewers":[],"requested_teams":[]},
                {"number":3,"merged_at":null,"requested_reviewers":[{"login":"rev"}]}
            ]"#,
        );
        transport.push(&files_url(1), 200, r#"[{"changes":30},{"changes":10}]"#);
        transport.push(&files_url(2), 200, r#"[{"changes":60}]"#);

        let stats = collector(&transport).fetch_review_stats(&RepoRef::github("o", "r"));
        let ReviewStats::Collected { mut pulls, skipped } = stats else {
            panic!("stats should be collected");
        };
        pulls.sort_by_key(|pull| pull.number);
        assert_eq!(skipped, 0);
        assert_eq!(
            pulls,
            vec![
                MergedPull {
                    number: 1,
                    reviewed: true,
                    changed_lines: 40,
                },
                MergedPull {
                    number: 2,
                    reviewed: false,
                    changed_lines: 60,
                },
            ]
        );
        assert_eq!(transport.call_count(&files_url(3)), 0);
    }

    #[test]
    fn failing_file_list_skips_only_that_pull() {
        let transport = Arc::new(FakeTransport::default());
        transport.push(
            &pulls_url(1),
            200,
            r#"[
                {"number":7,"merged_at":"2024-01-01T00:00:00Z","requested_reviewers":[{"login":"a"}]},
                {"number":8,"merged_at":"2024-01-01T00:00:00Z","requested_reviewers":[]}
            ]"#,
        );
        transport.push(&files_url(7), 200, r#"[{"changes":5}]"#);
        for _ in 0..4 {
            transport.push_result(&files_url(8), Err(ScoreError::Transport("reset".to_string())));
        }

        let stats = collector(&transport).fetch_review_stats(&RepoRef::github("o", "r"));
        assert_eq!(
            stats,
            ReviewStats::Collected {
                pulls: vec![MergedPull {
                    number: 7,
                    reviewed: true,
                    changed_lines: 5,
                }],
                skipped: 1,
            }
        );
    }

    #[test]
    fn failing_pull_list_is_unavailable() {
        let transport = Arc::new(FakeTransport::default());
        for _ in 0..4 {
            transport.push(&pulls_url(1), 500, "boom");
        }

        let stats = collector(&transport).fetch_review_stats(&RepoRef::github("o", "r"));
        assert_eq!(stats, ReviewStats::Unavailable);
    }

    #[test]
    fn listing_stops_at_the_page_cap() {
        let transport = Arc::new(FakeTransport::default());
        let full_page = format!(
            "[{}]",
            (0..100)
                .map(|n| format!(r#"{{"number":{n},"merged_at":null}}"#))
                .collect::<Vec<_>>()
                .join(",")
        );
        for page in 1..=4 {
            transport.push(&pulls_url(page), 200, &full_page);
        }

        let collector = collector(&transport);
        assert_eq!(collector.config.max_pull_request_pages, 3);
        let stats = collector.fetch_review_stats(&RepoRef::github("o", "r"));

        assert_eq!(stats, ReviewStats::default());
        for page in 1..=3 {
            assert_eq!(transport.call_count(&pulls_url(page)), 1);
        }
        assert_eq!(transport.call_count(&pulls_url(4)), 0);
    }
}
