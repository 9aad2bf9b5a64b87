//! scopes: named include/exclude path scopes for an editor workspace
//!
//! A scope is a named pair of path sets. Applying the active scope computes the
//! set of paths to hide so that only the included paths (and their ancestor
//! chains) stay visible, merges in explicit exclusions and a global baseline,
//! and writes the result into the host editor's `files.exclude` setting.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exclude;
pub mod scan;
pub mod store;
pub mod utils;
pub mod workspace;

pub use config::{JsonSettingsFile, MemorySettings, SettingsStore};
pub use domain::{ExclusionMap, Scope, ScopeList, ScopeState};
pub use error::SettingsError;
pub use exclude::{generate_exclusion_globs, intersect_paths, ExclusionOutcome};
pub use scan::{FileSystem, LocalFs};
pub use store::ScopeStore;
pub use workspace::{Workspace, WorkspaceFolder};
