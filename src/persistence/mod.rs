//! Small-record persistence
//!
//! Settings and the leaderboard are stored as JSON strings under fixed keys.
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON file per key in a directory (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Loading never fails the caller: a missing or corrupt record yields `None`
//! and a warning, so the game starts fresh instead of crashing.

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures reported by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// String key/value storage for small records
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode a JSON record, logging and discarding failures
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt {key} record: {e}");
            None
        }
    }
}

/// Encode a record as JSON and write it
pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
