use crate::types::scoring::{RepoDataResult, ADMISSION_THRESHOLD};

pub fn to_markdown(result: &RepoDataResult) -> String {
    let mut output = String::new();
    output.push_str("# Repository Trust Report\n\n");
    output.push_str(&format!("Repository: {}\n\n", result.url));
    output.push_str(&format!(
        "Net score: {:.3} ({})\n\n",
        result.net_score,
        if result.is_admissible() {
            "admitted"
        } else {
            "rejected"
        }
    ));
    output.push_str(&format!(
        "Admission threshold: {ADMISSION_THRESHOLD:.1}\n\n"
    ));

    output.push_str("## Metrics\n\n");
    output.push_str("| metric | score | latency (s) |\n");
    output.push_str("|---|---|---|\n");
    for (name, value, latency) in result.metric_rows() {
        output.push_str(&format!("| {name} | {value:.3} | {latency:.3} |\n"));
    }
    output.push_str(&format!(
        "| net_score | {:.3} | {:.3} |\n",
        result.net_score, result.net_score_latency
    ));

    output
}
