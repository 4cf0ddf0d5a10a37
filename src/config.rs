use crate::error::{RankError, Result};
use crate::types::config::SearchConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "reporank.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".reporank/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/reporank/config.toml";

pub fn load_config(path: &Path) -> Result<SearchConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(path, global.as_deref())
}

/// Merges global < `path` < local override, then validates.
pub(crate) fn load_config_with_global(
    path: &Path,
    global_path: Option<&Path>,
) -> Result<SearchConfig> {
    if !path.exists() {
        return Err(RankError::ConfigNotFound(path.display().to_string()));
    }

    let mut merged = Value::Table(Map::new());
    if let Some(global) = global_path {
        merge_file_if_exists(&mut merged, global)?;
    }
    merge_file_if_exists(&mut merged, path)?;
    let local = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_LOCAL_FILE);
    merge_file_if_exists(&mut merged, &local)?;

    let cfg: SearchConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| RankError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
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
        .map_err(|e| RankError::ConfigParse(format!("{}: {}", path.display(), e)))
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
