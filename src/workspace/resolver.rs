//! Workspace detection for a scope.
//!
//! A scope does not record which folder it was built in. The owning folder is
//! recovered by majority vote: a folder wins when more than half of the scope's
//! paths exist under it, which tolerates a few stale entries.

use super::{Workspace, WorkspaceFolder};
use crate::scan::FileSystem;
use std::path::Path;

/// Outcome of resolving a scope's owning folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Resolved(&'a WorkspaceFolder),
    /// No folder holds a majority of the scope's paths.
    NoMajority,
    /// More than one folder holds a majority.
    Ambiguous(Vec<&'a WorkspaceFolder>),
    /// The winning folder does not belong to the open workspace's name.
    NameMismatch(&'a WorkspaceFolder),
}

impl<'a> Resolution<'a> {
    pub fn folder(&self) -> Option<&'a WorkspaceFolder> {
        match self {
            Resolution::Resolved(folder) => Some(*folder),
            _ => None,
        }
    }

    /// One-line explanation suitable for showing to the user.
    pub fn describe(&self) -> String {
        match self {
            Resolution::Resolved(folder) => format!("scope belongs to {}", folder.name),
            Resolution::NoMajority => {
                "none of the workspace folders contains most of the scope's paths".to_string()
            }
            Resolution::Ambiguous(folders) => format!(
                "the scope matches several workspace folders ({})",
                folders.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ")
            ),
            Resolution::NameMismatch(folder) => {
                format!("folder '{}' is not part of the open workspace", folder.name)
            }
        }
    }
}

/// Whether a stored scope path resolves to an existing entry under `folder`.
fn path_in_folder<F: FileSystem>(fs: &F, folder: &WorkspaceFolder, path: &str) -> bool {
    if Path::new(path).is_absolute() {
        // Stored paths are workspace-relative whenever they lie inside a folder,
        // so an absolute one points outside of every known root.
        return false;
    }
    fs.exists(&folder.path.join(path))
}

/// Determine which workspace folder the given scope paths belong to.
pub fn resolve_scope_root<'w, 'p, F, I>(
    paths: I,
    workspace: &'w Workspace,
    fs: &F,
) -> Resolution<'w>
where
    F: FileSystem,
    I: IntoIterator<Item = &'p String>,
{
    let paths: Vec<&String> = paths.into_iter().collect();
    let total = paths.len();

    let winners: Vec<&WorkspaceFolder> = workspace
        .folders()
        .iter()
        .filter(|folder| {
            let hits = paths.iter().filter(|p| path_in_folder(fs, folder, p)).count();
            tracing::debug!("{} of {} scope paths found under {}", hits, total, folder.name);
            hits * 2 > total
        })
        .collect();

    if winners.len() > 1 {
        return Resolution::Ambiguous(winners);
    }
    match winners.first() {
        None => Resolution::NoMajority,
        Some(&folder) if workspace.name().contains(folder.name.as_str()) => {
            Resolution::Resolved(folder)
        }
        Some(&folder) => Resolution::NameMismatch(folder),
    }
}
