//! File-backed storage for native builds
//!
//! Each key maps to `<dir>/<encoded key>.json`. Writes go to a temp file in
//! the same directory and are renamed into place, so a crash never leaves a
//! half-written record and a failed write leaves nothing behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::KeyValueStorage;
use crate::consts::APP_NAME;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

/// Default storage directory: the platform data dir joined with the app name
pub fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_NAME))
}

/// File name for a key
///
/// ASCII letters, digits and `-` pass through; every other byte becomes
/// `_XX` (lowercase hex). `_` is itself escaped, so distinct keys always
/// map to distinct names.
fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("_{:02x}", byte));
        }
    }
    name
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

fn map_io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::PermissionDenied => {
            StorageError::Unavailable(format!("Permission denied: cannot {} {:?}", action, path))
        }
        ErrorKind::ReadOnlyFilesystem => {
            StorageError::Unavailable(format!("Cannot {} {:?}: filesystem is read-only", action, path))
        }
        ErrorKind::StorageFull => {
            StorageError::QuotaExceeded(format!("Cannot {} {:?}: no space left", action, path))
        }
        _ => StorageError::Io(e),
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io_error("read", &path, e)),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(format!("{:?}: {}", path, e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| map_io_error("create", &self.dir, e))?;

        let path = self.path_for(key);
        // Dropping the temp file on any error path deletes it
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| map_io_error("write", &self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| map_io_error("write", tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| map_io_error("write", &path, e.error))?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error("delete", &path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreferencesError;
    use crate::store::{PreferenceStore, StoreConfig};

    fn store_on(dir: &Path, key: &str) -> PreferenceStore<FileStorage> {
        let config = StoreConfig {
            storage_key: key.to_string(),
        };
        PreferenceStore::with_config(FileStorage::new(dir), config)
    }

    #[test]
    fn test_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("user-preferences", r#"{"a":1}"#).unwrap();
        assert!(dir.path().join("user-preferences.json").exists());
        assert_eq!(
            storage.get_item("user-preferences").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("nothing").unwrap(), None);
    }

    #[test]
    fn test_creates_dir_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("profile").join("data");
        let mut storage = FileStorage::new(&nested);

        storage.set_item("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
        assert_eq!(fs::read_dir(&nested).unwrap().count(), 1);
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        // Already gone
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_key_encoding() {
        let storage = FileStorage::new("/tmp/x");
        assert_eq!(
            storage.path_for("../app:prefs"),
            PathBuf::from("/tmp/x/_2e_2e_2fapp_3aprefs.json")
        );
        assert_eq!(
            storage.path_for("user-preferences"),
            PathBuf::from("/tmp/x/user-preferences.json")
        );
    }

    #[test]
    fn test_similar_keys_do_not_collide() {
        let keys = ["guest.prefs", "guest_prefs", "guest_2eprefs", "guest/prefs"];
        let storage = FileStorage::new("/tmp/x");
        let mut paths: Vec<PathBuf> = keys.iter().map(|k| storage.path_for(k)).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), keys.len());
    }

    #[test]
    fn test_stores_on_similar_keys_stay_separate() {
        let dir = tempfile::tempdir().unwrap();
        let mut dotted = store_on(dir.path(), "guest.prefs");
        dotted.toggle_saved_article("a1");

        let underscored = store_on(dir.path(), "guest_prefs");
        assert!(!underscored.is_article_saved("a1"));
        assert!(store_on(dir.path(), "guest.prefs").is_article_saved("a1"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::write(storage.path_for("user-preferences"), [0xff, 0xfe, b'{']).unwrap();

        assert!(matches!(
            storage.get_item("user-preferences"),
            Err(StorageError::InvalidData(_))
        ));

        let store = PreferenceStore::new(storage);
        assert!(matches!(
            store.try_load(),
            Err(PreferencesError::MalformedPersistedData(_))
        ));
        assert!(!store.preferences().onboarding_completed);
        assert!(store.preferences().selected_sports.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        // A directory where the record should go makes the rename fail
        fs::create_dir(storage.path_for("k")).unwrap();

        assert!(storage.set_item("k", "v").is_err());
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("k.json")]);
    }

    #[test]
    fn test_default_dir_uses_app_name() {
        if let Some(dir) = default_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
