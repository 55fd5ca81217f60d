pub mod json;
pub mod md;
pub mod ndjson;

use crate::error::ScoreError;
use crate::types::scoring::RepoDataResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Ndjson,
}

pub fn render(result: &RepoDataResult, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
        OutputFormat::Ndjson => ndjson::format_record(result).map_err(ScoreError::Json),
    }
}
