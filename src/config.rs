use crate::error::{Result, ScoreError};
use crate::types::config::RepotrustConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repotrust.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".repotrust/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repotrust/config.toml";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<RepotrustConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let mut cfg = load_config_with_global(root, explicit, global.as_deref())?;
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            cfg.set_token(token);
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<RepotrustConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ScoreError::ConfigParse(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    match explicit {
        Some(path) => merge_file_if_exists(&mut merged, path)?,
        None => merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?,
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: RepotrustConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
