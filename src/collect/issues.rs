use super::graphql::Connection;
use super::Collector;
use crate::error::Result;
use crate::locate::RepoRef;
use crate::types::signals::IssueLedger;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

const ISSUES_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    issues(first: $first, after: $after, states: [OPEN, CLOSED]) {
      pageInfo { hasNextPage endCursor }
      nodes { state createdAt closedAt }
    }
  }
}
"#;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Deserialize)]
struct IssuesData {
    repository: Option<IssuesRepository>,
}

#[derive(Debug, Deserialize)]
struct IssuesRepository {
    issues: Option<Connection<IssueNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    state: String,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds().max(0) as f64 / 1000.0 / SECONDS_PER_DAY
}

impl Collector {
    pub fn fetch_issue_ledger(&self, repo: &RepoRef) -> Result<IssueLedger> {
        let mut ledger = IssueLedger::default();
        self.paginate(
            "issues",
            ISSUES_QUERY,
            repo,
            |data: IssuesData| data.repository?.issues,
            |issue: IssueNode| {
                if issue.state.eq_ignore_ascii_case("closed") {
                    match issue.closed_at {
                        Some(closed_at) => {
                            ledger.record_closed(days_between(issue.created_at, closed_at))
                        }
                        None => ledger.closed += 1,
                    }
                } else {
                    ledger.record_open();
                }
            },
        )?;
        info!(
            repo = %repo,
            open = ledger.open,
            closed = ledger.closed,
            "collected issue ledger"
        );
        Ok(ledger)
    }
}
