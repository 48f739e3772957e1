//! Durable key-value storage
//!
//! The preference store only needs `localStorage`-shaped persistence:
//! string keys, string values, and calls that can fail when storage is
//! disabled or full.
//!
//! Backends:
//! - `MemoryStorage`: in-process map (native default, tests)
//! - `FileStorage`: one JSON file per key in a directory (native)
//! - `LocalStorage`: browser `window.localStorage` (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// String key-value persistence
pub trait KeyValueStorage {
    /// Read a value. `Ok(None)` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
