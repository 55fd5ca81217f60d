// Library-level tests: the full scoring pipeline against canned HTTP
// responses and an on-disk fixture instead of a git clone.

use repotrust::collect::checkout::{Checkout, CheckoutProvider};
use repotrust::collect::Collector;
use repotrust::http::{HttpClient, HttpResponse, Transport};
use repotrust::locate::RepoRef;
use repotrust::report::ndjson;
use repotrust::types::config::{CollectorConfig, RetryPolicy};
use repotrust::{batch, Result, Scorer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const API: &str = "https://api.github.test";
const GRAPHQL: &str = "https://api.github.test/graphql";
const RAW: &str = "https://raw.github.test";
const REGISTRY: &str = "https://registry.npm.test";

/// Answers every request to a URL with the same response; unknown URLs 404.
#[derive(Default)]
struct StaticTransport {
    routes: HashMap<String, (u16, String)>,
    calls: Mutex<Vec<String>>,
}

impl StaticTransport {
    fn route(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(url.to_string(), (status, body.to_string()));
        self
    }

    fn respond(&self, url: &str) -> Result<HttpResponse> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(url.to_string());
        let (status, body) = self
            .routes
            .get(url)
            .cloned()
            .unwrap_or((404, String::new()));
        Ok(HttpResponse { status, body })
    }
}

impl Transport for StaticTransport {
    fn get(&self, url: &str, _headers: &[(&str, String)]) -> Result<HttpResponse> {
        self.respond(url)
    }

    fn post_json(
        &self,
        url: &str,
        _headers: &[(&str, String)],
        _body: &Value,
    ) -> Result<HttpResponse> {
        self.respond(url)
    }
}

struct FixtureCheckout {
    files: Vec<(&'static str, &'static str)>,
}

impl CheckoutProvider for FixtureCheckout {
    fn checkout(&self, _repo: &RepoRef) -> Result<Checkout> {
        let dir = TempDir::new()?;
        for (name, content) in &self.files {
            std::fs::write(dir.path().join(name), content)?;
        }
        Ok(Checkout::new(dir))
    }
}

fn healthy_repository() -> StaticTransport {
    StaticTransport::default()
        .route(
            GRAPHQL,
            200,
            r#"{"data":{"repository":{
                "defaultBranchRef":{"target":{"history":{
                    "pageInfo":{"hasNextPage":false,"endCursor":null},
                    "nodes":[
                        {"author":{"name":"A","user":{"login":"alice"}}},
                        {"author":{"name":"B","user":{"login":"bob"}}},
                        {"author":{"name":"Carol","user":null}}
                    ]}}},
                "issues":{
                    "pageInfo":{"hasNextPage":false,"endCursor":null},
                    "nodes":[
                        {"state":"CLOSED","createdAt":"2024-01-01T00:00:00Z","closedAt":"2024-01-01T00:00:00Z"},
                        {"state":"CLOSED","createdAt":"2024-01-01T00:00:00Z","closedAt":"2024-01-01T00:00:00Z"},
                        {"state":"CLOSED","createdAt":"2024-01-01T00:00:00Z","closedAt":"2024-01-01T00:00:00Z"},
                        {"state":"OPEN","createdAt":"2024-01-01T00:00:00Z","closedAt":null}
                    ]}
            }}}"#,
        )
        .route(
            &format!("{API}/repos/o/r/pulls?state=closed&per_page=100&page=1"),
            200,
            r#"[{"number":1,"merged_at":"2024-01-01T00:00:00Z","requested_reviewers":[{"login":"x"}]},
                {"number":2,"merged_at":"2024-01-02T00:00:00Z","requested_reviewers":[]}]"#,
        )
        .route(
            &format!("{API}/repos/o/r/pulls/1/files?per_page=100&page=1"),
            200,
            r#"[{"changes":75}]"#,
        )
        .route(
            &format!("{API}/repos/o/r/pulls/2/files?per_page=100&page=1"),
            200,
            r#"[{"changes":25}]"#,
        )
        .route(
            &format!("{RAW}/o/r/HEAD/package.json"),
            200,
            r#"{"dependencies":{"a":"1.0.0"},"devDependencies":{"b":"^1.0.0"}}"#,
        )
        .route(
            &format!("{REGISTRY}/left-pad"),
            200,
            r#"{"name":"left-pad","repository":{"type":"git","url":"git+https://github.com/o/r.git"}}"#,
        )
}

fn scorer(transport: Arc<StaticTransport>, checkout: FixtureCheckout) -> Scorer {
    let config = CollectorConfig {
        api_url: API.to_string(),
        graphql_url: GRAPHQL.to_string(),
        raw_url: RAW.to_string(),
        npm_url: REGISTRY.to_string(),
        token: Some("token".to_string()),
        ..CollectorConfig::default()
    };
    let retry = RetryPolicy {
        max_retries: 3,
        base_delay: Duration::ZERO,
    };
    let client = HttpClient::new(transport, retry, config.token.clone());
    Scorer::new(Collector::new(config, client), Box::new(checkout))
}

fn documented_checkout() -> FixtureCheckout {
    FixtureCheckout {
        files: vec![
            (
                "README.md",
                "# r\n## Installation\n## Usage\n## Configuration\n## FAQ\n## Resources\n",
            ),
            ("LICENSE", "Apache License\nVersion 2.0, January 2004"),
        ],
    }
}

#[test]
fn scores_github_url() {
    let transport = Arc::new(healthy_repository());
    let result = scorer(transport, documented_checkout())
        .score("https://github.com/o/r")
        .expect("repository should score");

    assert_eq!(result.bus_factor, 1.0);
    assert_eq!(result.correctness, 0.75);
    assert_eq!(result.responsive_maintainer, 1.0);
    assert_eq!(result.ramp_up, 1.0);
    assert_eq!(result.license, 1.0);
    assert_eq!(result.good_pinning_practice, 0.5);
    assert_eq!(result.pull_request, 0.75);
    let expected = repotrust::aggregate::calculate_score(1.0, 1.0, 0.75, 1.0, 1.0, 0.5, 0.75);
    assert!((result.net_score - expected).abs() < 1e-12);
    assert!(result.is_admissible());
}

#[test]
fn resolves_npm_package_to_repository() {
    let transport = Arc::new(healthy_repository());
    let result = scorer(transport.clone(), documented_checkout())
        .score("https://www.npmjs.com/package/left-pad")
        .expect("package should score");

    assert_eq!(result.url, "https://www.npmjs.com/package/left-pad");
    let calls = transport.calls.lock().expect("calls lock");
    assert!(calls.iter().any(|url| url == &format!("{REGISTRY}/left-pad")));
}

#[test]
fn unknown_package_yields_no_result() {
    let transport = Arc::new(healthy_repository());
    let outcome = scorer(transport, documented_checkout())
        .score("https://www.npmjs.com/package/does-not-exist");
    assert!(outcome.is_none());
}

#[test]
fn repository_without_docs_yields_no_result() {
    let transport = Arc::new(healthy_repository());
    let checkout = FixtureCheckout {
        files: vec![("index.js", "module.exports = 1;")],
    };
    let err = scorer(transport, checkout)
        .try_score("https://github.com/o/r")
        .expect_err("missing docs should fail");
    assert!(matches!(err, repotrust::ScoreError::MissingDocs(_)));
}

#[test]
fn batch_writes_rounded_records() {
    let transport = Arc::new(healthy_repository());
    let scorer = scorer(transport, documented_checkout());
    let temp = TempDir::new().expect("temp dir should be created");
    let input = temp.path().join("urls.txt");
    let output = temp.path().join("scores.ndjson");
    std::fs::write(
        &input,
        "# candidates\nhttps://github.com/o/r\nhttps://bitbucket.org/o/r\n",
    )
    .expect("input should be written");

    let summary = batch::run_batch(&scorer, &input, &output).expect("batch should finish");
    assert_eq!(summary.scored, 1);
    assert_eq!(summary.failed, 1);

    let written = std::fs::read_to_string(&output).expect("output should exist");
    let record = ndjson::parse_record(written.trim()).expect("record should parse");
    assert_eq!(record.pull_request, 0.8);
    assert_eq!(record.correctness, 0.8);
    assert_eq!(record, record.rounded());
}
