pub mod license;
pub mod tree;

use crate::error::{Result, ScoreError};
use crate::http::HttpClient;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

pub const GITHUB_HOST: &str = "github.com";
const NPM_HOSTS: [&str; 2] = ["www.npmjs.com", "npmjs.com"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn github(owner: &str, name: &str) -> Self {
        Self {
            host: GITHUB_HOST.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let (host, path) = split_host(url)
            .ok_or_else(|| ScoreError::Resolution(format!("not a repository URL: {url}")))?;
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let owner = segments.next();
        let name = segments.next().map(|name| name.trim_end_matches(".git"));
        match (owner, name) {
            (Some(owner), Some(name)) if !name.is_empty() => {
                let host = host.to_ascii_lowercase();
                let repo = Self {
                    host: host.strip_prefix("www.").unwrap_or(&host).to_string(),
                    owner: owner.to_string(),
                    name: name.to_string(),
                };
                repo.ensure_supported()?;
                Ok(repo)
            }
            _ => Err(ScoreError::Resolution(format!(
                "URL does not name an owner and repository: {url}"
            ))),
        }
    }

    pub fn url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }

    pub fn clone_url(&self) -> String {
        format!("{}.git", self.url())
    }

    fn ensure_supported(&self) -> Result<()> {
        if self.host == GITHUB_HOST {
            Ok(())
        } else {
            Err(ScoreError::Resolution(format!(
                "unsupported repository host: {}",
                self.host
            )))
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputUrl {
    Package { name: String },
    Repository(RepoRef),
}

impl InputUrl {
    pub fn classify(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        if let Some((host, path)) = split_host(trimmed) {
            if NPM_HOSTS.contains(&host.to_ascii_lowercase().as_str()) {
                let name = path
                    .strip_prefix("package/")
                    .map(package_name)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        ScoreError::Resolution(format!("not an npm package URL: {trimmed}"))
                    })?;
                return Ok(Self::Package { name });
            }
        }
        RepoRef::parse(trimmed).map(Self::Repository)
    }
}

#[derive(Debug, Deserialize)]
struct RegistryManifest {
    repository: Option<RepositoryField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Shorthand(String),
    Detailed { url: Option<String> },
}

pub fn resolve_package_url(client: &HttpClient, registry_url: &str, url: &str) -> Result<RepoRef> {
    match InputUrl::classify(url)? {
        InputUrl::Repository(repo) => Ok(repo),
        InputUrl::Package { name } => {
            let manifest_url = format!("{}/{}", registry_url.trim_end_matches('/'), name);
            debug!(package = %name, url = %manifest_url, "fetching registry manifest");
            let manifest: RegistryManifest =
                client.get_public_json(&manifest_url).map_err(|err| match err {
                    ScoreError::NotFound(_) => {
                        ScoreError::Resolution(format!("package not found in registry: {name}"))
                    }
                    other => other,
                })?;
            let raw = match manifest.repository {
                Some(RepositoryField::Shorthand(raw)) => Some(raw),
                Some(RepositoryField::Detailed { url }) => url,
                None => None,
            }
            .ok_or_else(|| {
                ScoreError::Resolution(format!("package {name} declares no repository"))
            })?;
            let repo = normalize_repository(&raw).ok_or_else(|| {
                ScoreError::Resolution(format!("unusable repository reference for {name}: {raw}"))
            })?;
            info!(package = %name, repository = %repo.url(), "resolved package");
            Ok(repo)
        }
    }
}

pub fn normalize_repository(raw: &str) -> Option<RepoRef> {
    let mut text = raw.trim();
    if let Some((before, _fragment)) = text.split_once('#') {
        text = before;
    }
    text = text.trim_end_matches('/');
    text = text.strip_prefix("git+").unwrap_or(text);

    if let Some(shorthand) = text.strip_prefix("github:") {
        return shorthand_ref(shorthand);
    }
    if !text.contains(':') {
        if let Some(repo) = shorthand_ref(text) {
            return Some(repo);
        }
    }

    let url = if let Some(rest) = text.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        format!("https://{host}/{path}")
    } else if let Some(rest) = text.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map(|(_, host)| host).unwrap_or(rest);
        format!("https://{rest}")
    } else if let Some(rest) = text.strip_prefix("git://") {
        format!("https://{rest}")
    } else {
        text.to_string()
    };
    RepoRef::parse(&url).ok()
}

fn shorthand_ref(text: &str) -> Option<RepoRef> {
    let (owner, name) = text.split_once('/')?;
    let name = name.trim_end_matches(".git");
    let valid = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if valid(owner) && valid(name) {
        Some(RepoRef::github(owner, name))
    } else {
        None
    }
}

fn split_host(url: &str) -> Option<(&str, &str)> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    let (host, path) = rest.split_once('/')?;
    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some((host, path))
}

fn package_name(path: &str) -> String {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    match segments.next() {
        Some(scope) if scope.starts_with('@') => match segments.next() {
            Some(name) => format!("{scope}/{name}"),
            None => String::new(),
        },
        Some(name) => name.to_string(),
        None => String::new(),
    }
}
