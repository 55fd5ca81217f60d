use super::graphql::Connection;
use super::Collector;
use crate::error::Result;
use crate::locate::RepoRef;
use crate::types::signals::ContributorLedger;
use serde::Deserialize;
use tracing::info;

const COMMIT_HISTORY_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $first, after: $after) {
            pageInfo { hasNextPage endCursor }
            nodes { author { name user { login } } }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct CommitHistoryData {
    repository: Option<CommitRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitRepository {
    default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    target: Option<CommitTarget>,
}

#[derive(Debug, Deserialize)]
struct CommitTarget {
    history: Option<Connection<CommitNode>>,
}

#[derive(Debug, Deserialize)]
struct CommitNode {
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: Option<String>,
    user: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    login: String,
}

impl CommitNode {
    fn contributor(self) -> Option<String> {
        let author = self.author?;
        author
            .user
            .map(|user| user.login)
            .or(author.name)
            .filter(|who| !who.trim().is_empty())
    }
}

impl Collector {
    pub fn fetch_commit_authors(&self, repo: &RepoRef) -> Result<ContributorLedger> {
        let mut ledger = ContributorLedger::default();
        self.paginate(
            "commits",
            COMMIT_HISTORY_QUERY,
            repo,
            |data: CommitHistoryData| {
                data.repository?
                    .default_branch_ref?
                    .target?
                    .history
            },
            |node: CommitNode| {
                if let Some(login) = node.contributor() {
                    ledger.record(&login);
                }
            },
        )?;
        info!(
            repo = %repo,
            contributors = ledger.contributors(),
            commits = ledger.total_commits(),
            "collected commit authors"
        );
        Ok(ledger)
    }
}
