// ── Key/value persistence ────────────────────────────────────────────────────

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::error::{Field, StoreError};

/// The four flat entries the configuration occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Provider,
    ApiKey,
    BaseUrl,
    ModelName,
}

impl StoreKey {
    pub fn all() -> [StoreKey; 4] {
        [StoreKey::Provider, StoreKey::ApiKey, StoreKey::BaseUrl, StoreKey::ModelName]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Provider  => "provider",
            StoreKey::ApiKey    => "apiKey",
            StoreKey::BaseUrl   => "baseUrl",
            StoreKey::ModelName => "modelName",
        }
    }
}

impl From<Field> for StoreKey {
    fn from(field: Field) -> Self {
        match field {
            Field::ApiKey    => StoreKey::ApiKey,
            Field::BaseUrl   => StoreKey::BaseUrl,
            Field::ModelName => StoreKey::ModelName,
        }
    }
}

/// Flat, synchronous key/value medium. Each call is atomic for its own key
/// only; there is no transaction spanning several keys.
pub trait ConfigStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<&'static str, String>,
    /// Remaining writes before every further write is rejected.
    writes_left: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, keyed by the persisted key names.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (StoreKey, &'a str)>) -> Self {
        let mut store = Self::new();
        for (key, value) in entries {
            store.entries.insert(key.as_str(), value.to_string());
        }
        store
    }

    /// Accept `n` more writes, then reject the rest. Simulates a save that
    /// is cut short partway through.
    pub fn fail_writes_after(&mut self, n: usize) {
        self.writes_left = Some(n);
    }

    pub fn get(&self, key: StoreKey) -> Option<&str> {
        self.entries.get(key.as_str()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key.as_str()).cloned())
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(StoreError::Rejected(key.as_str()));
            }
            *left -= 1;
        }
        self.entries.insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.entries.remove(key.as_str());
        Ok(())
    }
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// Stores the entries as one flat JSON object on disk. Every write or remove
/// rewrites the whole file through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sowa").join("settings.json"))
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_err(source)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let body = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl ConfigStore for FileStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let value = self.load()?.remove(key.as_str());
        debug!(key = key.as_str(), present = value.is_some(), "store read");
        Ok(value)
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.persist(&entries)?;
        debug!(key = key.as_str(), "store write");
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key.as_str()).is_some() {
            self.persist(&entries)?;
            debug!(key = key.as_str(), "store remove");
        }
        Ok(())
    }
}
