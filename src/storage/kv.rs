//! Key-value stores backing the ledger
//!
//! The ledger persists three JSON documents under fixed keys. Anything that
//! can get and set a string by key can hold them.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::write_text_atomic;

/// A string-valued key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> LedgerResult<()>;
}

/// A shared store, so a caller can keep a handle on what `Storage` writes
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        (**self).set(key, value)
    }
}

/// Stores each key as `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path).map(Some).map_err(|e| {
            LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-memory store, used by tests and when embedding the ledger
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_on: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `key` fail until cleared
    pub fn fail_writes_to(&self, key: Option<&str>) {
        if let Ok(mut fail_on) = self.fail_on.lock() {
            *fail_on = key.map(str::to_string);
        }
    }

    /// Seed a raw value, bypassing the failure switch
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| LedgerError::Storage("Memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        let failing = self
            .fail_on
            .lock()
            .map_err(|_| LedgerError::Storage("Memory store lock poisoned".into()))?
            .as_deref()
            == Some(key);
        if failing {
            return Err(LedgerError::Storage(format!("Write to '{}' rejected", key)));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LedgerError::Storage("Memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        assert_eq!(store.get("wallets").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));

        store.set("wallets", "[]").unwrap();
        assert_eq!(store.get("wallets").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data").join("wallets.json").exists());
    }

    #[test]
    fn test_memory_store_failure_switch() {
        let store = MemoryStore::new();
        store.set("categories", "[]").unwrap();

        store.fail_writes_to(Some("categories"));
        assert!(store.set("categories", "[1]").is_err());
        assert!(store.set("wallets", "[]").is_ok());
        assert_eq!(store.get("categories").unwrap().as_deref(), Some("[]"));

        store.fail_writes_to(None);
        assert!(store.set("categories", "[1]").is_ok());
    }
}
