//! Key-value stores for client-side persisted state
//!
//! The session layer only needs `get`, `set` and `remove` over string keys, so
//! every backend implements the [`Store`] trait: an in-memory map for tests and
//! short-lived processes, a JSON file that survives between runs, and Redis for
//! sharing state between machines.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use redis::{Client, Commands};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::{StoreBackend, StoreSettings};
use crate::error::{StoreError, StoreResult};

/// String key-value store with last-write-wins semantics
pub trait Store: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Process-local store backed by a hash map
///
/// ```rust
/// use common::store::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.set("authToken", "abc").unwrap();
/// assert_eq!(store.get("authToken").unwrap().as_deref(), Some("abc"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object in a single file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// Load for a read-modify-write; an undecodable file is replaced rather
    /// than blocking every later write. The flag reports that it was discarded.
    fn load_for_write(&self) -> StoreResult<(BTreeMap<String, String>, bool)> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(StoreError::Encoding(e)) => {
                warn!("Discarding unreadable store file {}: {}", self.path.display(), e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    /// Write through a sibling temp file renamed into place, so readers never
    /// see a partially written file.
    fn save(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let (mut entries, discarded) = self.load_for_write()?;
        if entries.remove(key).is_some() || discarded {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Store backed by a Redis server, with every key namespaced by a prefix
pub struct RedisStore {
    client: Client,
    key_prefix: String,
}

impl RedisStore {
    /// Open a Redis client for `url`; no connection is made until first use
    pub fn new(url: &str, key_prefix: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        info!("Redis store initialized with URL: {}", url);
        Ok(Self {
            client,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Check if Redis is reachable
    pub fn health_check(&self) -> StoreResult<bool> {
        let mut conn = self.client.get_connection()?;
        let pong: String = redis::cmd("PING").query(&mut conn)?;
        Ok(pong == "PONG")
    }
}

impl Store for RedisStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.get_connection()?;
        let value: Option<String> = conn.get(self.key(key))?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.get_connection()?;
        let _: () = conn.set(self.key(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.get_connection()?;
        let _: u64 = conn.del(self.key(key))?;
        Ok(())
    }
}

/// Build the store selected by the configuration
pub fn open_store(settings: &StoreSettings) -> StoreResult<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match settings.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            info!("Using file store at {}", settings.path.display());
            Arc::new(FileStore::new(settings.path.clone()))
        }
        StoreBackend::Redis => Arc::new(RedisStore::new(&settings.redis_url, &settings.key_prefix)?),
    };

    Ok(store)
}
