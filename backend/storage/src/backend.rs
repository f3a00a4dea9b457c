//! Key-value backends the history store writes through.
//!
//! Reads and writes are synchronous and last-write-wins; concurrent
//! processes are not coordinated. Write failures surface as
//! `ReelError::Storage`, distinct from network errors.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use reelscope_core::ReelError;

/// Abstract string key-value storage.
pub trait KvBackend: Send + Sync {
    /// Load the value for a key, `None` if the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, ReelError>;

    /// Store a value, replacing any previous one.
    fn store(&self, key: &str, value: &str) -> Result<(), ReelError>;

    /// Remove a key; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), ReelError>;
}

/// One JSON document per key, as files under a data directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ReelError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| ReelError::Storage(format!("cannot create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Backend rooted at the platform data directory (`<data>/reelscope`).
    pub fn open_default() -> Result<Self, ReelError> {
        let base = dirs::data_dir()
            .ok_or_else(|| ReelError::Storage("no platform data directory".to_string()))?;
        Self::new(base.join("reelscope"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, ReelError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReelError::Storage(format!(
                "read {} failed: {}",
                path.display(),
                e
            ))),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), ReelError> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| {
            ReelError::Storage(format!("write {} failed: {}", path.display(), e))
        })
    }

    fn remove(&self, key: &str) -> Result<(), ReelError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ReelError::Storage(format!(
                "remove {} failed: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, ReelError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ReelError::Storage("kv lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), ReelError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ReelError::Storage("kv lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ReelError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ReelError::Storage("kv lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
