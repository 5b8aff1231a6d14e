//! Local key-value persistence. Each top-level collection is serialized as
//! JSON under a stable string key; the in-memory state stays authoritative
//! for the session and a failed write is logged and otherwise ignored.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

mod memory;
mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

pub const CANDIDATES_KEY: &str = "mvm_candidates";
pub const ASSETS_KEY: &str = "mvm_assets";
pub const USERS_KEY: &str = "mvm_users";
pub const CURRENT_USER_KEY: &str = "mvm_current_user_id";
pub const GEOCODE_CACHE_KEY: &str = "mvm_geocode_cache";

pub trait KvStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

pub trait KvStoreExt: KvStore {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.put_raw(key, serde_json::to_vec(value)?)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
