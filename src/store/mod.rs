//! Scope store: named scopes, the active-scope pointer, the global exclusion
//! baseline and the enabled flag.
//!
//! The settings store is the single source of truth. Every mutating operation
//! re-reads it first, applies its change and writes the touched key straight
//! back (read-modify-write, last writer wins).

use crate::config::SettingsStore;
use crate::domain::{
    default_collection, ExclusionMap, Scope, ScopeCollection, ScopeList, ScopeState,
    DEFAULT_SCOPE, KEY_ACTIVE_SCOPE, KEY_ENABLED, KEY_FILES_EXCLUDE, KEY_GLOBAL_EXCLUDE,
    KEY_SCOPES,
};
use crate::exclude::{generate_exclusion_globs, ExclusionOutcome};
use crate::scan::FileSystem;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

type Observer = Box<dyn FnMut()>;

pub struct ScopeStore<S: SettingsStore, F: FileSystem> {
    settings: S,
    workspace: Workspace,
    fs: F,
    state: ScopeState,
    observers: Vec<Observer>,
}

impl<S: SettingsStore, F: FileSystem> ScopeStore<S, F> {
    /// Create a store with default in-memory state. Call [`ScopeStore::load`] (or
    /// use [`ScopeStore::open`]) before reading from it.
    pub fn new(settings: S, workspace: Workspace, fs: F) -> Self {
        Self { settings, workspace, fs, state: ScopeState::default(), observers: Vec::new() }
    }

    pub fn open(settings: S, workspace: Workspace, fs: F) -> Result<Self> {
        let mut store = Self::new(settings, workspace, fs);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory state with what the settings store holds.
    ///
    /// On first run the global baseline is seeded from the host's current
    /// `files.exclude` and a single empty `base` scope is created; both are
    /// persisted immediately. A malformed scope collection is reseeded the same
    /// way, an empty one is kept.
    pub fn load(&mut self) -> Result<()> {
        let enabled = self.read_key::<bool>(KEY_ENABLED)?.unwrap_or(true);
        let active_scope =
            self.read_key::<String>(KEY_ACTIVE_SCOPE)?.unwrap_or_else(|| DEFAULT_SCOPE.to_string());

        let global_exclude = match self.read_key::<ExclusionMap>(KEY_GLOBAL_EXCLUDE)? {
            Some(map) => map.into_iter().filter(|(_, hide)| *hide).collect(),
            None => {
                let seeded = self.host_exclusions()?;
                tracing::info!("Seeding global exclusions with {} host entries", seeded.len());
                self.write_key(KEY_GLOBAL_EXCLUDE, &seeded)?;
                seeded
            }
        };

        let scopes = match self.read_key::<ScopeCollection>(KEY_SCOPES)? {
            Some(scopes) => scopes,
            None => {
                let seeded = default_collection();
                self.write_key(KEY_SCOPES, &seeded)?;
                seeded
            }
        };

        self.state = ScopeState { enabled, active_scope, global_exclude, scopes };
        Ok(())
    }

    /// Point the active scope at `name`, creating it empty when unknown.
    pub fn set_active_scope(&mut self, name: &str) -> Result<()> {
        self.load()?;
        if !self.state.scopes.contains_key(name) {
            tracing::info!("Creating scope '{}'", name);
            self.state.scopes.insert(name.to_string(), Scope::default());
            self.persist_scopes()?;
        }
        self.state.active_scope = name.to_string();
        self.write_key(KEY_ACTIVE_SCOPE, &name)
    }

    /// Remove a scope. Unknown names are ignored.
    ///
    /// Deleting the active scope leaves the pointer naming a scope that no longer
    /// exists; the generator then treats it as empty.
    pub fn delete_scope(&mut self, name: &str) -> Result<bool> {
        self.load()?;
        if self.state.scopes.remove(name).is_none() {
            return Ok(false);
        }
        if name == self.state.active_scope {
            tracing::warn!("Deleted the active scope '{}'; no scope is active now", name);
        }
        self.persist_scopes()?;
        Ok(true)
    }

    /// Toggle `path` in one of the active scope's lists.
    ///
    /// Returns `true` when the path is now a member of `list`, `false` when it was
    /// already there and has been removed. A dangling active pointer recreates the
    /// scope it names.
    pub fn toggle_item(&mut self, list: ScopeList, path: &str) -> Result<bool> {
        self.load()?;
        let relative = self.workspace.as_relative_path(path);
        let active = self.state.active_scope.clone();
        let added = self.state.scopes.entry(active.clone()).or_default().toggle(list, &relative);
        tracing::debug!(
            "{} {} in scope '{}' ({})",
            if added { "Added" } else { "Removed" },
            relative,
            active,
            list
        );
        self.persist_scopes()?;
        Ok(added)
    }

    /// Flip the enabled flag and return its new value.
    pub fn toggle(&mut self) -> Result<bool> {
        self.load()?;
        let enabled = !self.state.enabled;
        self.state.enabled = enabled;
        self.write_key(KEY_ENABLED, &enabled)?;
        Ok(enabled)
    }

    /// Reload, re-emit the host exclusion map and notify observers.
    pub fn refresh(&mut self) -> Result<ExclusionOutcome> {
        self.load()?;
        let outcome = self.update_files_exclude()?;
        for observer in self.observers.iter_mut() {
            observer();
        }
        Ok(outcome)
    }

    /// Write the generated map over the host's `files.exclude`, unless the
    /// generator asked for it to be left unchanged.
    pub fn update_files_exclude(&mut self) -> Result<ExclusionOutcome> {
        let outcome = self.generate_exclusion_globs();
        match &outcome {
            ExclusionOutcome::Apply(map) => {
                tracing::info!("Writing {} exclusion entries", map.len());
                self.write_key(KEY_FILES_EXCLUDE, map)?;
            }
            ExclusionOutcome::Unchanged { message } => {
                tracing::info!("Host exclusions not updated: {}", message);
            }
        }
        Ok(outcome)
    }

    /// Compute the exclusion map from the in-memory state without writing it.
    pub fn generate_exclusion_globs(&self) -> ExclusionOutcome {
        generate_exclusion_globs(&self.state, &self.workspace, &self.fs)
    }

    /// Register a callback run after every [`ScopeStore::refresh`], in
    /// registration order.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn scope_names(&self) -> Vec<&str> {
        self.state.scopes.keys().map(String::as_str).collect()
    }

    pub fn active_scope(&self) -> &str {
        &self.state.active_scope
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.state.scopes.get(name)
    }

    pub fn global_exclude(&self) -> &ExclusionMap {
        &self.state.global_exclude
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// The host's current `files.exclude`, `true` entries only.
    pub fn host_exclusions(&self) -> Result<ExclusionMap> {
        let Some(Value::Object(raw)) = self.raw_key(KEY_FILES_EXCLUDE)? else {
            return Ok(ExclusionMap::new());
        };
        Ok(raw
            .into_iter()
            .filter(|(_, v)| v.as_bool() == Some(true))
            .map(|(k, _)| (k, true))
            .collect())
    }

    fn persist_scopes(&mut self) -> Result<()> {
        let scopes = self.state.scopes.clone();
        self.write_key(KEY_SCOPES, &scopes)
    }

    fn raw_key(&self, key: &str) -> Result<Option<Value>> {
        self.settings.get(key).with_context(|| format!("Failed reading setting '{}'", key))
    }

    /// Read and decode one key. A malformed value is warned about and treated as
    /// absent so the caller falls back to the default.
    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.raw_key(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::warn!("Ignoring malformed setting '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    fn write_key<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.settings
            .update_serialized(key, value)
            .with_context(|| format!("Failed writing setting '{}'", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemorySettings;
    use crate::scan::LocalFs;
    use serde_json::json;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn store_with(settings: MemorySettings) -> ScopeStore<MemorySettings, LocalFs> {
        let ws = Workspace::from_roots([PathBuf::from("/proj")]);
        ScopeStore::open(settings, ws, LocalFs).expect("open")
    }

    fn scope_json(store: &ScopeStore<MemorySettings, LocalFs>) -> Value {
        store.settings().get(KEY_SCOPES).expect("get").expect("scopes key")
    }

    #[test]
    fn first_load_seeds_defaults_and_baseline() {
        let settings = MemorySettings::new()
            .with(KEY_FILES_EXCLUDE, json!({"**/.git": true, "**/node_modules": false}));
        let store = store_with(settings);

        assert!(store.is_enabled());
        assert_eq!(store.active_scope(), "base");
        assert_eq!(store.scope_names(), vec!["base"]);
        let expected: ExclusionMap = [("**/.git".to_string(), true)].into_iter().collect();
        assert_eq!(store.global_exclude(), &expected);
        assert_eq!(
            store.settings().get(KEY_GLOBAL_EXCLUDE).expect("get"),
            Some(json!({"**/.git": true}))
        );
        assert_eq!(scope_json(&store), json!({"base": {"included": [], "excluded": []}}));
    }

    #[test]
    fn baseline_is_not_reseeded_once_stored() {
        let settings = MemorySettings::new()
            .with(KEY_GLOBAL_EXCLUDE, json!({"out": true}))
            .with(KEY_FILES_EXCLUDE, json!({"something/else": true}));
        let store = store_with(settings);
        assert_eq!(store.global_exclude().keys().collect::<Vec<_>>(), vec!["out"]);
    }

    #[test]
    fn stored_baseline_keeps_only_true_entries() {
        let settings = MemorySettings::new()
            .with(KEY_ENABLED, json!(false))
            .with(KEY_GLOBAL_EXCLUDE, json!({"out": true, "target": false}));
        let mut store = store_with(settings);
        assert_eq!(store.global_exclude().keys().collect::<Vec<_>>(), vec!["out"]);

        store.refresh().expect("refresh");
        assert_eq!(
            store.settings().get(KEY_FILES_EXCLUDE).expect("get"),
            Some(json!({"out": true}))
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let settings = MemorySettings::new()
            .with(KEY_ENABLED, json!("yes"))
            .with(KEY_SCOPES, json!({"base": {"included": 7}}))
            .with(KEY_ACTIVE_SCOPE, json!(12));
        let store = store_with(settings);
        assert!(store.is_enabled());
        assert_eq!(store.active_scope(), "base");
        assert_eq!(store.scope("base"), Some(&Scope::default()));
    }

    #[test]
    fn toggle_item_keeps_lists_disjoint() {
        let mut store = store_with(MemorySettings::new());

        assert!(store.toggle_item(ScopeList::Excluded, "/proj/docs").expect("toggle"));
        assert!(store.toggle_item(ScopeList::Included, "/proj/docs").expect("toggle"));

        let base = store.scope("base").expect("base");
        assert!(base.included.contains("docs"));
        assert!(!base.excluded.contains("docs"));
        assert_eq!(scope_json(&store), json!({"base": {"included": ["docs"], "excluded": []}}));
    }

    #[test]
    fn toggle_item_twice_restores_state() {
        let mut store = store_with(MemorySettings::new());
        let before = store.scope("base").cloned();

        assert!(store.toggle_item(ScopeList::Included, "src/core").expect("toggle"));
        assert!(!store.toggle_item(ScopeList::Included, "./src/core/").expect("toggle"));
        assert_eq!(store.scope("base").cloned(), before);
    }

    #[test]
    fn set_active_scope_creates_and_persists_new_scope() {
        let mut store = store_with(MemorySettings::new());
        store.set_active_scope("feature").expect("set");

        assert_eq!(store.active_scope(), "feature");
        assert_eq!(store.scope("feature"), Some(&Scope::default()));
        assert_eq!(store.settings().get(KEY_ACTIVE_SCOPE).expect("get"), Some(json!("feature")));

        // A fresh load sees the new scope.
        let mut reloaded = store_with(
            MemorySettings::new()
                .with(KEY_SCOPES, scope_json(&store))
                .with(KEY_ACTIVE_SCOPE, json!("feature")),
        );
        reloaded.load().expect("load");
        assert_eq!(reloaded.scope_names(), vec!["base", "feature"]);
    }

    #[test]
    fn deleting_active_scope_leaves_pointer_dangling() {
        let mut store = store_with(MemorySettings::new());
        assert!(store.delete_scope("base").expect("delete"));

        assert_eq!(store.active_scope(), "base");
        assert!(store.scope("base").is_none());
        assert_eq!(scope_json(&store), json!({}));

        // An emptied collection is not reseeded; only a missing one is.
        store.load().expect("reload");
        assert!(store.scope_names().is_empty());
        assert_eq!(store.active_scope(), "base");
        assert!(!store.delete_scope("never-existed").expect("delete"));
    }

    #[test]
    fn toggle_flips_and_persists_enabled_flag() {
        let mut store = store_with(MemorySettings::new());
        assert!(!store.toggle().expect("toggle"));
        assert_eq!(store.settings().get(KEY_ENABLED).expect("get"), Some(json!(false)));
        assert!(store.toggle().expect("toggle"));
    }

    #[test]
    fn mutations_reread_the_settings_store() {
        let mut store = store_with(MemorySettings::new());
        store
            .settings
            .update(KEY_SCOPES, json!({"base": {"included": [], "excluded": []}, "other": {}}))
            .expect("external edit");

        store.set_active_scope("other").expect("set");
        assert_eq!(store.scope_names(), vec!["base", "other"]);
    }

    #[test]
    fn refresh_writes_host_exclusions_and_notifies_in_order() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        for dir in ["src/core", "src/util", "docs"] {
            fs::create_dir_all(root.join(dir)).expect("mkdir");
        }

        let settings = MemorySettings::new().with(KEY_FILES_EXCLUDE, json!({"**/.git": true}));
        let ws = Workspace::from_roots([root.clone()]);
        let mut store = ScopeStore::open(settings, ws, LocalFs).expect("open");

        let calls = Rc::new(RefCell::new(Vec::new()));
        for id in 1..=2 {
            let calls = Rc::clone(&calls);
            store.subscribe(move || calls.borrow_mut().push(id));
        }

        let core = root.join("src/core").to_string_lossy().into_owned();
        store.toggle_item(ScopeList::Included, &core).expect("toggle");
        let outcome = store.refresh().expect("refresh");

        assert!(matches!(outcome, ExclusionOutcome::Apply(_)));
        assert_eq!(
            store.settings().get(KEY_FILES_EXCLUDE).expect("get"),
            Some(json!({"**/.git": true, "docs": true, "src/util": true}))
        );
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn refresh_ignores_a_deleted_inclusion() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        for dir in ["src/core", "src/util", "docs"] {
            fs::create_dir_all(root.join(dir)).expect("mkdir");
        }

        let settings = MemorySettings::new().with(KEY_GLOBAL_EXCLUDE, json!({})).with(
            KEY_SCOPES,
            json!({"base": {"included": ["src/core", "docs", "old/feature"], "excluded": []}}),
        );
        let ws = Workspace::from_roots([root]);
        let mut store = ScopeStore::open(settings, ws, LocalFs).expect("open");

        let outcome = store.refresh().expect("refresh");
        assert!(matches!(outcome, ExclusionOutcome::Apply(_)));
        assert_eq!(
            store.settings().get(KEY_FILES_EXCLUDE).expect("get"),
            Some(json!({"src/util": true}))
        );
    }

    #[test]
    fn unresolved_refresh_keeps_host_exclusions() {
        let settings = MemorySettings::new()
            .with(KEY_FILES_EXCLUDE, json!({"manual": true}))
            .with(KEY_GLOBAL_EXCLUDE, json!({}))
            .with(KEY_SCOPES, json!({"base": {"included": ["nowhere"], "excluded": []}}));
        let mut store = store_with(settings);

        let outcome = store.refresh().expect("refresh");
        assert!(matches!(outcome, ExclusionOutcome::Unchanged { .. }));
        assert_eq!(
            store.settings().get(KEY_FILES_EXCLUDE).expect("get"),
            Some(json!({"manual": true}))
        );
    }

    #[test]
    fn disabled_refresh_emits_exactly_the_baseline() {
        let settings = MemorySettings::new()
            .with(KEY_ENABLED, json!(false))
            .with(KEY_GLOBAL_EXCLUDE, json!({"target": true}))
            .with(KEY_FILES_EXCLUDE, json!({"stale": true}))
            .with(KEY_SCOPES, json!({"base": {"included": ["nowhere"], "excluded": ["docs"]}}));
        let mut store = store_with(settings);

        store.refresh().expect("refresh");
        assert_eq!(
            store.settings().get(KEY_FILES_EXCLUDE).expect("get"),
            Some(json!({"target": true}))
        );
    }
}
