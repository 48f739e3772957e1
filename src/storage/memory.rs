//! In-memory storage backend
//!
//! Can simulate disabled storage and a byte quota, the two ways browser
//! storage fails in practice.

use std::collections::HashMap;

use super::KeyValueStorage;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    available: bool,
    /// Maximum total bytes of keys + values
    quota: Option<usize>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            available: true,
            quota: None,
        }
    }

    /// Storage that fails every call, like a browser with storage disabled
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Storage that rejects writes past `bytes` total
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Raw stored value, bypassing availability checks
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Write a raw value, bypassing availability and quota checks
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage is disabled".to_string()))
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "{} bytes needed, quota is {}",
                    needed, quota
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.remove(key);
        Ok(())
    }
}
