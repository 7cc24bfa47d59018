use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use toml::Value;

pub const EVENTS_KEY: &str = "dday-events";
pub const SELECTED_KEY: &str = "selected-event-id";
pub const POSITION_KEY: &str = "panel-position";
pub const INDEX_KEY: &str = "panel-index";

/// Key-value settings store backing all persistent state.
///
/// Writes are synchronous, but change notifications are queued and only
/// observed when the event loop drains them with [`take_changes`], strictly
/// after the writing call has returned. Callers must not assume a re-render
/// happens inside a `set_*` call.
///
/// [`take_changes`]: SettingsStore::take_changes
pub trait SettingsStore {
    fn get_string(&self, key: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_int(&self, key: &str) -> i64;
    fn set_int(&mut self, key: &str, value: i64);

    /// Keys written since the last drain, in write order.
    fn take_changes(&mut self) -> Vec<String>;
}

fn default_string(key: &str) -> &'static str {
    match key {
        EVENTS_KEY => "[]",
        POSITION_KEY => "right",
        _ => "",
    }
}

fn default_int(key: &str) -> i64 {
    match key {
        INDEX_KEY => -1,
        _ => 0,
    }
}

/// Store persisted as a flat TOML table on disk.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
    changes: Vec<String>,
}

impl FileStore {
    /// Open the store at `$XDG_CONFIG_HOME/dday/settings.toml`.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| eyre!("no config directory available"))?
            .join("dday");
        Self::open(dir.join("settings.toml"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let values = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    // Corrupt settings file: start from defaults, keep running
                    log::error!("malformed settings file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Ok(Self {
            path,
            values,
            changes: Vec::new(),
        })
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::error!("failed to create {}: {e}", parent.display());
                return;
            }
        }
        let content = toml::to_string(&self.values).expect("settings serialize to TOML");
        if let Err(e) = fs::write(&self.path, content) {
            log::error!("failed to write {}: {e}", self.path.display());
        }
    }

    fn set_value(&mut self, key: &str, value: Value) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_string(), value);
        self.changes.push(key.to_string());
        self.save();
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn get_string(&self, key: &str) -> String {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default_string(key))
            .to_string()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set_value(key, Value::String(value.to_string()));
    }

    fn get_int(&self, key: &str) -> i64 {
        self.values
            .get(key)
            .and_then(|v| v.as_integer())
            .unwrap_or_else(|| default_int(key))
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set_value(key, Value::Integer(value));
    }

    fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes)
    }
}

/// In-memory fake with the same notification semantics, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
    changes: Vec<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_string(), value);
        self.changes.push(key.to_string());
    }
}

#[cfg(test)]
impl SettingsStore for MemoryStore {
    fn get_string(&self, key: &str) -> String {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default_string(key))
            .to_string()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set_value(key, Value::String(value.to_string()));
    }

    fn get_int(&self, key: &str) -> i64 {
        self.values
            .get(key)
            .and_then(|v| v.as_integer())
            .unwrap_or_else(|| default_int(key))
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set_value(key, Value::Integer(value));
    }

    fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes)
    }
}
