use super::Collector;
use crate::error::{Result, ScoreError};
use crate::locate::RepoRef;
use crate::types::signals::PackageManifest;
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "package.json";

impl Collector {
    pub fn fetch_manifest(&self, repo: &RepoRef) -> Result<Option<PackageManifest>> {
        let url = format!(
            "{}/{}/{}/HEAD/{MANIFEST_FILE}",
            self.config.raw_url.trim_end_matches('/'),
            repo.owner,
            repo.name
        );
        let body = match self.client.get_public(&url) {
            Ok(body) => body,
            Err(ScoreError::NotFound(_)) => {
                debug!(repo = %repo, "no dependency manifest");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        match serde_json::from_str::<PackageManifest>(&body) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(err) => {
                warn!(repo = %repo, error = %err, "ignoring unparseable dependency manifest");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collect::testing::{collector, RAW};
    use crate::http::testing::FakeTransport;
    use crate::locate::RepoRef;
    use std::sync::Arc;

    fn manifest_url() -> String {
        format!("{RAW}/o/r/HEAD/package.json")
    }

    #[test]
    fn parses_dependency_groups() {
        let transport = Arc::new(FakeTransport::default());
        transport.push(
            &manifest_url(),
            200,
            r#"{"name":"demo","dependencies":{"a":"1.2.3"},"devDependencies":{"b":"^1.0.0"}}"#,
        );

        let manifest = collector(&transport)
            .fetch_manifest(&RepoRef::github("o", "r"))
            .expect("fetch should succeed")
            .expect("manifest should exist");
        assert_eq!(manifest.dependencies.get("a").map(String::as_str), Some("1.2.3"));
        assert_eq!(manifest.dev_dependencies.len(), 1);
    }

    #[test]
    fn missing_manifest_is_none() {
        let transport = Arc::new(FakeTransport::default());
        let manifest = collector(&transport)
            .fetch_manifest(&RepoRef::github("o", "r"))
            .expect("404 is not an error");
        assert!(manifest.is_none());
        assert_eq!(transport.call_count(&manifest_url()), 1);
    }

    #[test]
    fn malformed_manifest_is_none() {
        let transport = Arc::new(FakeTransport::default());
        transport.push(&manifest_url(), 200, "{ not json");
        let manifest = collector(&transport)
            .fetch_manifest(&RepoRef::github("o", "r"))
            .expect("malformed manifest is tolerated");
        assert!(manifest.is_none());
    }
}
