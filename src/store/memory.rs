use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::store::KvStore;

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
