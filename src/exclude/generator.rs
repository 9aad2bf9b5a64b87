//! Exclusion map generation for the active scope.

use super::intersect::intersect_paths;
use super::siblings::sibling_set;
use crate::domain::{ExclusionMap, Scope, ScopeState};
use crate::scan::FileSystem;
use crate::workspace::{resolve_scope_root, Workspace};
use std::collections::BTreeSet;

/// Result of [`generate_exclusion_globs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionOutcome {
    /// Replace the host's exclusion setting with this map.
    Apply(ExclusionMap),
    /// Leave the host's exclusion setting alone; `message` says why.
    Unchanged { message: String },
}

impl ExclusionOutcome {
    pub fn map(&self) -> Option<&ExclusionMap> {
        match self {
            ExclusionOutcome::Apply(map) => Some(map),
            ExclusionOutcome::Unchanged { .. } => None,
        }
    }
}

/// Compute the merged exclusion map: global baseline, the active scope's explicit
/// exclusions and every path that no inclusion needs visible.
pub fn generate_exclusion_globs<F: FileSystem>(
    state: &ScopeState,
    workspace: &Workspace,
    fs: &F,
) -> ExclusionOutcome {
    let mut result = state.global_exclude.clone();
    if !state.enabled {
        return ExclusionOutcome::Apply(result);
    }

    let empty = Scope::default();
    let scope = match state.active() {
        Some(scope) => scope,
        None => {
            tracing::warn!(
                "Active scope '{}' does not exist; applying the global exclusions only",
                state.active_scope
            );
            &empty
        }
    };

    // Nothing to place in a folder, so nothing beyond the baseline to add.
    if scope.is_empty() {
        return ExclusionOutcome::Apply(result);
    }

    let resolution = resolve_scope_root(scope.all_paths(), workspace, fs);
    let Some(folder) = resolution.folder() else {
        let message = format!(
            "Scope '{}' was not applied: {}. The file exclusions were left unchanged.",
            state.active_scope,
            resolution.describe()
        );
        tracing::warn!("{}", message);
        return ExclusionOutcome::Unchanged { message };
    };
    tracing::debug!("Applying scope '{}' in {}", state.active_scope, folder.path.display());

    for path in &scope.excluded {
        result.insert(workspace.as_relative_path(path), true);
    }

    // An inclusion whose walk failed has no say in what stays visible.
    let sibling_sets: Vec<BTreeSet<String>> = scope
        .included
        .iter()
        .filter_map(|path| {
            let siblings = sibling_set(fs, &folder.path, path);
            if siblings.is_none() {
                tracing::warn!("Ignoring inclusion {} in scope '{}'", path, state.active_scope);
            }
            siblings
        })
        .collect();
    for path in intersect_paths(&sibling_sets) {
        result.insert(workspace.as_relative_path(&path), true);
    }

    ExclusionOutcome::Apply(result)
}
