//! Workspace folders and path relativisation
//!
//! A workspace is an ordered list of folders plus the display name the editor
//! shows for the whole session.

use crate::utils::{clean_relative, lexical_normalize, normalize_path, relative_to};
use std::path::{Path, PathBuf};

pub mod resolver;

pub use resolver::{resolve_scope_root, Resolution};

/// One root folder of the open workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    name: String,
    folders: Vec<WorkspaceFolder>,
}

impl Workspace {
    /// Build a workspace from root directories. The display name defaults to the
    /// folder names joined with `", "`.
    pub fn from_roots(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let folders: Vec<WorkspaceFolder> =
            roots.into_iter().map(|p| WorkspaceFolder::new(lexical_normalize(&p))).collect();
        let name = folders.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ");
        Self { name, folders }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folders(&self) -> &[WorkspaceFolder] {
        &self.folders
    }

    /// The folder containing an absolute `path`, if any.
    pub fn folder_for(&self, path: &Path) -> Option<&WorkspaceFolder> {
        let normalized = lexical_normalize(path);
        self.folders.iter().find(|f| normalized.starts_with(&f.path))
    }

    /// Express `path` relative to the workspace folder that contains it.
    ///
    /// Absolute paths outside every folder are returned unchanged (slash
    /// normalised); relative paths are assumed to already be workspace-relative.
    pub fn as_relative_path(&self, path: &str) -> String {
        let normalized = normalize_path(path.trim());
        let as_path = Path::new(&normalized);
        if !as_path.is_absolute() {
            return clean_relative(&normalized);
        }
        let cleaned = lexical_normalize(as_path);
        self.folders
            .iter()
            .find_map(|f| relative_to(&cleaned, &f.path))
            .unwrap_or_else(|| crate::utils::to_posix_path(&cleaned))
    }
}
