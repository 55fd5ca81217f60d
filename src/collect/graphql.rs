use super::Collector;
use crate::error::Result;
use crate::locate::RepoRef;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<N>>,
}

impl Collector {
    // `query` must accept `$owner`, `$name`, `$first` and `$after`.
    pub(crate) fn paginate<D, N>(
        &self,
        label: &str,
        query: &str,
        repo: &RepoRef,
        select: impl Fn(D) -> Option<Connection<N>>,
        mut visit: impl FnMut(N),
    ) -> Result<u32>
    where
        D: DeserializeOwned,
    {
        let mut cursor: Option<String> = None;
        let mut pages = 0u32;
        loop {
            let variables = json!({
                "owner": repo.owner,
                "name": repo.name,
                "first": self.config.page_size,
                "after": cursor,
            });
            let data: D = self
                .client
                .graphql(&self.config.graphql_url, query, variables)?;
            let Some(connection) = select(data) else {
                debug!(repo = %repo, label, "connection absent, stopping");
                break;
            };
            pages += 1;
            connection.nodes.into_iter().flatten().for_each(&mut visit);

            let next = connection
                .page_info
                .end_cursor
                .filter(|_| connection.page_info.has_next_page);
            match next {
                Some(end_cursor) if self.config.max_pages == 0 || pages < self.config.max_pages => {
                    cursor = Some(end_cursor);
                }
                Some(_) => {
                    debug!(repo = %repo, label, pages, "page cap reached");
                    break;
                }
                None => break,
            }
        }
        debug!(repo = %repo, label, pages, "pagination complete");
        Ok(pages)
    }
}
