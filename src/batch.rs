use crate::error::Result;
use crate::pipeline::Scorer;
use crate::report::ndjson;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    pub failed: usize,
}

pub fn read_urls(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

pub fn run_batch(scorer: &Scorer, input: &Path, output: &Path) -> Result<BatchSummary> {
    let text = std::fs::read_to_string(input)?;
    let urls = read_urls(&text);
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(output)?;

    let mut summary = BatchSummary::default();
    for url in urls {
        match scorer.score(url) {
            Some(result) => {
                let line = ndjson::format_record(&result)?;
                writeln!(file, "{line}")?;
                file.flush()?;
                summary.scored += 1;
            }
            None => {
                warn!(url, "no result; continuing with next URL");
                summary.failed += 1;
            }
        }
    }
    info!(
        scored = summary.scored,
        failed = summary.failed,
        output = %output.display(),
        "batch finished"
    );
    Ok(summary)
}
