pub mod aggregate;
pub mod batch;
pub mod collect;
pub mod config;
pub mod error;
pub mod http;
pub mod locate;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod types;

pub use error::{Result, ScoreError};
pub use pipeline::{Scorer, Stage};
pub use types::scoring::{RepoDataResult, ADMISSION_THRESHOLD};
