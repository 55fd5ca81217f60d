use crate::error::{Result, ScoreError};
use crate::types::config::RetryPolicy;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("repotrust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport: Send + Sync {
    fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse>;

    fn post_json(&self, url: &str, headers: &[(&str, String)], body: &Value)
        -> Result<HttpResponse>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let response = request
            .call()
            .map_err(|e| ScoreError::Transport(format!("{url}: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ScoreError::Transport(format!("{url}: {e}")))?;
        Ok(HttpResponse { status, body })
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<HttpResponse> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let response = request
            .send_json(body)
            .map_err(|e| ScoreError::Transport(format!("{url}: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ScoreError::Transport(format!("{url}: {e}")))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy, token: Option<String>) -> Self {
        Self {
            transport,
            retry,
            token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn get_public(&self, url: &str) -> Result<String> {
        let headers = [
            ("User-Agent", USER_AGENT.to_string()),
            ("Accept", "application/json".to_string()),
        ];
        self.with_retry(url, || self.transport.get(url, &headers))
    }

    pub fn get_public_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_public(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn get_api<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let headers = self.api_headers();
        let body = self.with_retry(url, || self.transport.get(url, &headers))?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn graphql<D: DeserializeOwned>(&self, url: &str, query: &str, variables: Value) -> Result<D> {
        let headers = self.api_headers();
        let payload = json!({ "query": query, "variables": variables });
        let body = self.with_retry(url, || self.transport.post_json(url, &headers, &payload))?;
        let envelope: GraphqlEnvelope<D> = serde_json::from_str(&body)?;
        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ScoreError::Api {
                status: 200,
                url: url.to_string(),
                message,
            });
        }
        envelope.data.ok_or_else(|| ScoreError::Api {
            status: 200,
            url: url.to_string(),
            message: "response carried no data".to_string(),
        })
    }

    fn api_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("User-Agent", USER_AGENT.to_string()),
            ("Accept", "application/vnd.github+json".to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        headers
    }

    fn with_retry<F>(&self, url: &str, send: F) -> Result<String>
    where
        F: Fn() -> Result<HttpResponse>,
    {
        let mut retry = 0;
        loop {
            let outcome = send().and_then(|response| check_status(url, response));
            match outcome {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    let delay_ms = delay.as_millis() as u64;
                    warn!(url, attempt = retry + 1, delay_ms, error = %err, "request failed, retrying");
                    std::thread::sleep(delay);
                    retry += 1;
                }
                Err(err) => {
                    debug!(url, retries = retry, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }
}

fn check_status(url: &str, response: HttpResponse) -> Result<String> {
    match response.status {
        200..=299 => Ok(response.body),
        404 => Err(ScoreError::NotFound(url.to_string())),
        status => Err(ScoreError::Api {
            status,
            url: url.to_string(),
            message: truncate(&response.body, 200),
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
