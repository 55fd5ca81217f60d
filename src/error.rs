use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("cannot resolve repository: {0}")]
    Resolution(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("api error {status} from {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("repository has neither README nor LICENSE: {0}")]
    MissingDocs(String),

    #[error("{metric} could not be computed: {reason}")]
    Metric {
        metric: &'static str,
        reason: String,
    },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("checkout failed: {0}")]
    Checkout(#[from] git2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
