//! On-device storage.
//!
//! This module provides:
//! - The `KeyValueStore` abstraction over a string-to-string store
//! - `FileStore`, one file per key in the data directory (`file`)
//! - `MemoryStore`, an in-process map for tests and throwaway sessions
//! - `LocalStore`, the adapter that reads and writes record blobs (`local`)

pub mod file;
pub mod local;

use std::collections::HashMap;

use crate::errors::Result;

pub use file::FileStore;
pub use local::LocalStore;

/// A flat string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keeps everything in a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
