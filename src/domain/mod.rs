//! Core data model: scopes, the scope collection and the exclusion map.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name of the scope seeded on first run.
pub const DEFAULT_SCOPE: &str = "base";

/// Settings keys owned by this tool.
pub const KEY_ENABLED: &str = "scopes.enabled";
pub const KEY_ACTIVE_SCOPE: &str = "scopes.activeScope";
pub const KEY_GLOBAL_EXCLUDE: &str = "scopes.globalExclude";
pub const KEY_SCOPES: &str = "scopes.scopes";

/// The host editor's native "hide these paths" setting.
pub const KEY_FILES_EXCLUDE: &str = "files.exclude";

/// Mapping from path-glob to `true` ("hide this").
pub type ExclusionMap = BTreeMap<String, bool>;

/// Which of a scope's two path sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeList {
    Included,
    Excluded,
}

impl ScopeList {
    pub fn other(self) -> Self {
        match self {
            ScopeList::Included => ScopeList::Excluded,
            ScopeList::Excluded => ScopeList::Included,
        }
    }
}

impl fmt::Display for ScopeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeList::Included => write!(f, "included"),
            ScopeList::Excluded => write!(f, "excluded"),
        }
    }
}

/// A named pair of disjoint path sets.
///
/// Paths are stored workspace-relative where possible. A path is a member of at
/// most one of the two sets; [`Scope::toggle`] maintains that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub included: BTreeSet<String>,
    #[serde(default)]
    pub excluded: BTreeSet<String>,
}

impl Scope {
    pub fn list(&self, list: ScopeList) -> &BTreeSet<String> {
        match list {
            ScopeList::Included => &self.included,
            ScopeList::Excluded => &self.excluded,
        }
    }

    fn list_mut(&mut self, list: ScopeList) -> &mut BTreeSet<String> {
        match list {
            ScopeList::Included => &mut self.included,
            ScopeList::Excluded => &mut self.excluded,
        }
    }

    /// Toggle `path` in `list`.
    ///
    /// Returns `true` when the path ended up a member of `list` and `false` when it
    /// was already there and has been removed.
    pub fn toggle(&mut self, list: ScopeList, path: &str) -> bool {
        if self.list_mut(list).remove(path) {
            return false;
        }
        self.list_mut(list.other()).remove(path);
        self.list_mut(list).insert(path.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    /// Every path in the scope, included first.
    pub fn all_paths(&self) -> impl Iterator<Item = &String> {
        self.included.iter().chain(self.excluded.iter())
    }
}

/// All scopes, keyed by name.
pub type ScopeCollection = BTreeMap<String, Scope>;

pub fn default_collection() -> ScopeCollection {
    let mut scopes = ScopeCollection::new();
    scopes.insert(DEFAULT_SCOPE.to_string(), Scope::default());
    scopes
}

/// In-memory snapshot of everything the scope store owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeState {
    pub enabled: bool,
    pub active_scope: String,
    pub global_exclude: ExclusionMap,
    pub scopes: ScopeCollection,
}

impl Default for ScopeState {
    fn default() -> Self {
        Self {
            enabled: true,
            active_scope: DEFAULT_SCOPE.to_string(),
            global_exclude: ExclusionMap::new(),
            scopes: default_collection(),
        }
    }
}

impl ScopeState {
    /// The active scope, or `None` when the pointer names a deleted scope.
    pub fn active(&self) -> Option<&Scope> {
        self.scopes.get(&self.active_scope)
    }
}
