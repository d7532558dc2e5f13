//! Key-value persistence for flashcard collections
//!
//! Directory layout used by [`FileStore`]:
//! ```text
//! {data_dir}/
//! ├── recall.cards.json
//! ├── recall.packs.json
//! ├── recall.stats.json
//! ├── recall.history.json
//! ├── recall.streak.json
//! └── recall.sessions.json
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage::Result;

/// Every key the tracker persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Cards,
    Packs,
    Stats,
    History,
    Streak,
    Sessions,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        Self::Cards,
        Self::Packs,
        Self::Stats,
        Self::History,
        Self::Streak,
        Self::Sessions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cards => "recall.cards",
            Self::Packs => "recall.packs",
            Self::Stats => "recall.stats",
            Self::History => "recall.history",
            Self::Streak => "recall.streak",
            Self::Sessions => "recall.sessions",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw string storage keyed by [`StorageKey`]
pub trait KeyValueStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;
    fn set(&mut self, key: StorageKey, value: String) -> Result<()>;
    /// Removing a missing key is not an error
    fn remove(&mut self, key: StorageKey) -> Result<()>;
}

/// In-memory store, used in tests and when nothing should touch disk
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<StorageKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        self.entries.remove(&key);
        Ok(())
    }
}

/// One JSON file per key inside a data directory
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create the data directory if needed
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.as_str()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.init()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Load and validate a collection, falling back to its default
///
/// Missing keys, unreadable storage and documents that do not match the
/// expected shape all yield `T::default()`.
pub fn load_collection<T, S>(store: &S, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("Failed to read {}: {}; using empty value", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Invalid data under {}: {}; using empty value", key, e);
            T::default()
        }
    }
}

/// Serialize a collection and write it under `key`
pub fn save_collection<T, S>(store: &mut S, key: StorageKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    store.set(key, json)
}
