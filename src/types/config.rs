use crate::error::ScoreError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_NPM_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepotrustConfig {
    pub github: Option<GithubConfig>,
    pub registry: Option<RegistryConfig>,
    pub collector: Option<CollectorSection>,
    pub retry: Option<RetryConfig>,
    pub http: Option<HttpConfig>,
    pub checkout: Option<CheckoutConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubConfig {
    pub api_url: Option<String>,
    pub graphql_url: Option<String>,
    pub raw_url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    pub npm_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectorSection {
    pub page_size: Option<u32>,
    pub max_pages: Option<u32>,
    pub max_pull_request_pages: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetryConfig {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub api_url: String,
    pub graphql_url: String,
    pub raw_url: String,
    pub npm_url: String,
    pub token: Option<String>,
    pub page_size: u32,
    // Zero means no cap.
    pub max_pages: u32,
    pub max_pull_request_pages: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
            npm_url: DEFAULT_NPM_URL.to_string(),
            token: None,
            page_size: 100,
            max_pages: 0,
            max_pull_request_pages: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

impl RepotrustConfig {
    pub fn collector(&self) -> CollectorConfig {
        let defaults = CollectorConfig::default();
        let github = self.github.clone().unwrap_or_default();
        let collector = self.collector.clone().unwrap_or_default();
        CollectorConfig {
            api_url: github.api_url.unwrap_or(defaults.api_url),
            graphql_url: github.graphql_url.unwrap_or(defaults.graphql_url),
            raw_url: github.raw_url.unwrap_or(defaults.raw_url),
            npm_url: self
                .registry
                .as_ref()
                .and_then(|registry| registry.npm_url.clone())
                .unwrap_or(defaults.npm_url),
            token: github.token.filter(|token| !token.trim().is_empty()),
            page_size: collector.page_size.unwrap_or(defaults.page_size),
            max_pages: collector.max_pages.unwrap_or(defaults.max_pages),
            max_pull_request_pages: collector
                .max_pull_request_pages
                .unwrap_or(defaults.max_pull_request_pages),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match &self.retry {
            Some(retry) => RetryPolicy {
                max_retries: retry.max_retries.unwrap_or(defaults.max_retries),
                base_delay: retry
                    .base_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.base_delay),
            },
            None => defaults,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(
            self.http
                .as_ref()
                .and_then(|http| http.timeout_secs)
                .unwrap_or(30),
        )
    }

    pub fn checkout_directory(&self) -> Option<PathBuf> {
        self.checkout
            .as_ref()
            .and_then(|checkout| checkout.directory.clone())
    }

    pub fn set_token(&mut self, token: String) {
        self.github.get_or_insert_with(GithubConfig::default).token = Some(token);
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        let collector = self.collector();
        if !(1..=100).contains(&collector.page_size) {
            return Err(ScoreError::ConfigParse(format!(
                "collector.page_size must be between 1 and 100 (found {})",
                collector.page_size
            )));
        }

        for (key, url) in [
            ("github.api_url", &collector.api_url),
            ("github.graphql_url", &collector.graphql_url),
            ("github.raw_url", &collector.raw_url),
            ("registry.npm_url", &collector.npm_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ScoreError::ConfigParse(format!(
                    "{key} must be an http(s) URL: {url}"
                )));
            }
        }

        if let Some(timeout_secs) = self.http.as_ref().and_then(|http| http.timeout_secs) {
            if timeout_secs == 0 {
                return Err(ScoreError::ConfigParse(
                    "http.timeout_secs must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(max_retries) = self.retry.as_ref().and_then(|retry| retry.max_retries) {
            if max_retries > 10 {
                return Err(ScoreError::ConfigParse(format!(
                    "retry.max_retries must be at most 10 (found {max_retries})"
                )));
            }
        }

        Ok(())
    }
}
