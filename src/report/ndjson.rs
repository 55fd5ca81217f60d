use crate::types::scoring::RepoDataResult;

pub fn format_record(result: &RepoDataResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(&result.rounded())
}

pub fn parse_record(line: &str) -> Result<RepoDataResult, serde_json::Error> {
    serde_json::from_str(line.trim())
}
