//! Config file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a `scopes.toml` / `scopes.yml` file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Host settings file holding `files.exclude` and the `scopes.*` keys
    pub settings: Option<PathBuf>,
    /// Workspace folders, in order
    pub roots: Vec<PathBuf>,
    /// Display name of the open workspace
    pub workspace_name: Option<String>,
}

pub fn load_config(base_dir: &Path, config_path: Option<&Path>) -> Result<ToolConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(base_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(ToolConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(mut cfg) => {
            // Relative paths in a config file are relative to the file itself.
            let config_dir = config_file.parent().unwrap_or(base_dir);
            cfg.settings = cfg.settings.map(|p| config_dir.join(p));
            cfg.roots = cfg.roots.into_iter().map(|p| config_dir.join(p)).collect();
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(ToolConfig::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[scopes]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<ToolConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("scopes") {
        Some(nested) if nested.is_table() => nested.clone(),
        _ => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `scopes:` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<ToolConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("scopes") {
        Some(nested) if nested.is_mapping() => nested.clone(),
        _ => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(base_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["scopes.toml", ".scopes.toml", "scopes.yml", ".scopes.yml", "scopes.yaml", ".scopes.yaml"];

    candidates.iter().map(|candidate| base_dir.join(candidate)).find(|path| path.exists())
}
