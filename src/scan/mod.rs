//! Filesystem capability used by the resolver and the sibling walk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The two filesystem primitives scope computation needs.
pub trait FileSystem {
    /// Whether an entry exists at `path`. Stat errors count as absent.
    fn exists(&self, path: &Path) -> bool;

    /// Immediate children of `dir`, dotfiles included, optionally skipping `except`.
    fn list_children(&self, dir: &Path, except: Option<&Path>) -> Result<Vec<PathBuf>>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }

    fn list_children(&self, dir: &Path, except: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        let walker =
            WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false).sort_by_file_name();
        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed listing directory: {}", dir.display()))?;
            if except.is_some_and(|skip| entry.path() == skip) {
                continue;
            }
            children.push(entry.into_path());
        }
        Ok(children)
    }
}
