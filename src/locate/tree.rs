use super::license;
use crate::error::{Result, ScoreError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const LICENSE_PREFIXES: [&str; 3] = ["license", "licence", "copying"];

pub fn top_level_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn name_starts_with(path: &Path, prefixes: &[&str]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| {
            let lower = name.to_ascii_lowercase();
            prefixes.iter().any(|prefix| lower.starts_with(prefix))
        })
        .unwrap_or(false)
}

pub fn locate_readme(root: &Path) -> Option<PathBuf> {
    top_level_files(root)
        .into_iter()
        .find(|path| name_starts_with(path, &["readme"]))
}

pub fn locate_license(root: &Path, readme: Option<&Path>) -> Result<Option<String>> {
    let license_files: Vec<PathBuf> = top_level_files(root)
        .into_iter()
        .filter(|path| name_starts_with(path, &LICENSE_PREFIXES))
        .collect();

    if license_files.is_empty() && readme.is_none() {
        return Err(ScoreError::MissingDocs(root.display().to_string()));
    }

    for path in &license_files {
        let text = read_text_lossy(path)?;
        if let Some(name) = license::classify(&text) {
            return Ok(Some(name.to_string()));
        }
    }

    match readme {
        Some(path) => {
            let text = read_text_lossy(path)?;
            Ok(license::classify(&text).map(str::to_string))
        }
        None => Ok(None),
    }
}
