// SPDX-License-Identifier: MPL-2.0
//! Durable storage for the language preference.
//!
//! [`PreferenceStore`] is the port; [`FileStore`] persists a small TOML
//! map under the user configuration directory (the durable client storage
//! of a native embedding), and [`MemoryStore`] backs tests and transient
//! embeddings.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const PREFS_FILE: &str = "preferences.toml";
const APP_NAME: &str = "langswap";

/// Port for the durable key-value store holding the language preference.
pub trait PreferenceStore {
    /// The stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Persists `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ==========================================================================
// FileStore
// ==========================================================================

/// TOML-file-backed store. Every `set` writes through to disk.
#[derive(Debug)]
pub struct FileStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at the platform default location. Without a config
    /// directory (rare), the store still works but nothing persists.
    pub fn open_default() -> Self {
        match default_path() {
            Some(path) => Self::open(path),
            None => Self {
                path: None,
                entries: BTreeMap::new(),
            },
        }
    }

    /// Opens the store at an explicit path. A missing file starts empty;
    /// an unreadable or malformed file degrades to empty rather than
    /// failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self {
            path: Some(path),
            entries,
        }
    }

    fn write_through(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.entries)?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(PREFS_FILE);
        path
    })
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        return BTreeMap::new();
    }
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_default(),
        Err(_) => BTreeMap::new(),
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_through()
    }
}

// ==========================================================================
// MemoryStore
// ==========================================================================

/// In-memory store for tests and transient embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
