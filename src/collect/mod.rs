pub mod checkout;
pub mod commits;
pub mod graphql;
pub mod issues;
pub mod manifest;
pub mod reviews;

use crate::error::Result;
use crate::http::HttpClient;
use crate::locate::{tree, RepoRef};
use crate::types::config::CollectorConfig;
use crate::types::signals::RepositorySignals;
use checkout::CheckoutProvider;
use tracing::{debug, warn};

pub struct Collector {
    pub(crate) config: CollectorConfig,
    pub(crate) client: HttpClient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryDocs {
    pub readme: Option<String>,
    pub license: Option<String>,
}

impl Collector {
    pub fn new(config: CollectorConfig, client: HttpClient) -> Self {
        if !client.has_token() {
            warn!("no GitHub token configured; GraphQL requests will be rejected");
        }
        Self { config, client }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn collect(
        &self,
        repo: &RepoRef,
        checkout: &dyn CheckoutProvider,
    ) -> Result<RepositorySignals> {
        let (network, docs) = rayon::join(
            || {
                let ((contributors, issues), (reviews, manifest)) = rayon::join(
                    || {
                        rayon::join(
                            || self.fetch_commit_authors(repo),
                            || self.fetch_issue_ledger(repo),
                        )
                    },
                    || {
                        rayon::join(
                            || self.fetch_review_stats(repo),
                            || self.fetch_manifest(repo),
                        )
                    },
                );
                Ok::<_, crate::error::ScoreError>((contributors?, issues?, reviews, manifest?))
            },
            || read_documents(repo, checkout),
        );
        let (contributors, issues, reviews, manifest) = network?;
        let docs = docs?;

        Ok(RepositorySignals {
            readme: docs.readme,
            license: docs.license,
            manifest,
            contributors,
            issues,
            reviews,
        })
    }
}

pub fn read_documents(repo: &RepoRef, provider: &dyn CheckoutProvider) -> Result<RepositoryDocs> {
    let checkout = provider.checkout(repo)?;
    let readme_path = tree::locate_readme(checkout.path());
    let license = tree::locate_license(checkout.path(), readme_path.as_deref())?;
    let readme = readme_path
        .as_deref()
        .map(tree::read_text_lossy)
        .transpose()?;
    debug!(
        repo = %repo,
        has_readme = readme.is_some(),
        license = license.as_deref().unwrap_or("unknown"),
        "read repository documents"
    );
    Ok(RepositoryDocs { readme, license })
}
