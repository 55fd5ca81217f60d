use crate::types::scoring::RepoDataResult;

pub fn to_json(result: &RepoDataResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
