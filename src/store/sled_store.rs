use std::path::Path;

use crate::error::Result;
use crate::store::KvStore;

/// Sled-backed store; the production persistence backend.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }
}

impl KvStore for SledStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|value| value.to_vec()))
    }

    fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }
}
