//! Browser `localStorage` backend (WASM only)

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use super::KeyValueStorage;
use crate::error::StorageError;

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`
    ///
    /// Fails when there is no window (workers) or storage is disabled,
    /// e.g. by privacy settings.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<web_sys::DomException>()
        .map(|e| format!("{}: {}", e.name(), e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| {
            let quota = e
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|d| d.name() == "QuotaExceededError");
            if quota {
                StorageError::QuotaExceeded(describe(&e))
            } else {
                StorageError::Unavailable(describe(&e))
            }
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }
}
