use web_sys::Storage;

use super::{KeyValueStore, StoreError};

/// Browser LocalStorage
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open the window's LocalStorage (fails in private modes or without a window)
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not available".into()))?;
        Ok(Self { storage })
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(js_err)
    }
}
