//! Key-value settings stores.
//!
//! The host editor keeps its configuration as a flat JSON object with dotted keys
//! (`"files.exclude"`, `"scopes.activeScope"`, ...). [`JsonSettingsFile`] reads and
//! writes such a file directly; [`MemorySettings`] keeps the same shape in memory.

use crate::error::SettingsError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Configuration collaborator contract.
pub trait SettingsStore {
    /// Read one key. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;

    /// Replace one key wholesale.
    fn update(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;

    fn update_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SettingsError>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)
            .map_err(|source| SettingsError::Serialize { key: key.to_string(), source })?;
        self.update(key, value)
    }
}

/// Settings kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Map<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A `settings.json` file on disk.
///
/// Every `get` re-reads the file so edits made by other processes are picked up.
/// Every `update` is a read-modify-write of the whole object followed by an atomic
/// rename; concurrent writers are last-writer-wins.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(SettingsError::Read { path: self.path.clone(), source }),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&content)
            .map_err(|source| SettingsError::Parse { path: self.path.clone(), source })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(SettingsError::NotAnObject { path: self.path.clone() }),
        }
    }

    fn write_object(&self, map: &Map<String, Value>) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut content = serde_json::to_string_pretty(map)
            .map_err(|source| SettingsError::Serialize { key: "*".to_string(), source })?;
        content.push('\n');

        // Temp file + rename so a crash never leaves a truncated settings file.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        tracing::debug!("Wrote settings file {}", self.path.display());
        Ok(())
    }
}

impl SettingsStore for JsonSettingsFile {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.read_object()?.remove(key))
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut map = self.read_object()?;
        map.insert(key.to_string(), value);
        self.write_object(&map)
    }
}
