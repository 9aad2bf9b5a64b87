//! Merge CLI overrides with the config file
//!
//! Precedence is CLI > Env > File > Defaults. Clap already folds the environment
//! into the CLI values, so only three layers remain here.

use super::loader::ToolConfig;
use crate::utils::lexical_normalize;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Values supplied on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub settings: Option<PathBuf>,
    pub roots: Vec<PathBuf>,
    pub workspace_name: Option<String>,
}

/// Fully resolved session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub settings_path: PathBuf,
    pub workspace: Workspace,
}

pub fn merge_cli_with_config(cli: CliOverrides, file: ToolConfig, cwd: &Path) -> SessionConfig {
    let absolutize = |p: PathBuf| lexical_normalize(&cwd.join(p));

    let roots: Vec<PathBuf> = if !cli.roots.is_empty() {
        cli.roots.into_iter().map(absolutize).collect()
    } else if !file.roots.is_empty() {
        file.roots.into_iter().map(absolutize).collect()
    } else {
        vec![cwd.to_path_buf()]
    };

    let settings_path = cli
        .settings
        .or(file.settings)
        .map(absolutize)
        .unwrap_or_else(|| roots[0].join(".vscode").join("settings.json"));

    let mut workspace = Workspace::from_roots(roots);
    if let Some(name) = cli.workspace_name.or(file.workspace_name) {
        workspace = workspace.with_name(name);
    }

    SessionConfig { settings_path, workspace }
}
