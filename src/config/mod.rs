//! Configuration loading and merging
//!
//! Two kinds of configuration live here: the host editor's key-value settings
//! store (where scopes are persisted) and this tool's own optional config file,
//! merged with CLI arguments (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;
pub mod settings;

pub use loader::{load_config, ToolConfig};
pub use merge::{merge_cli_with_config, CliOverrides, SessionConfig};
pub use settings::{JsonSettingsFile, MemorySettings, SettingsStore};
