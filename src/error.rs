//! Error types for the preference store
//!
//! None of these reach the callers of the store's mutation operations; they
//! are recovered inside the store and logged. `try_load` and `flush` surface
//! them for callers that want to tell the user preferences were not saved.

use thiserror::Error;

/// Failure of the durable key-value backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Stored bytes are not valid text
    #[error("Stored value is not valid UTF-8: {0}")]
    InvalidData(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preference persistence error
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error(transparent)]
    StorageUnavailable(#[from] StorageError),

    #[error("Malformed persisted preferences: {0}")]
    MalformedPersistedData(String),

    #[error("Unsupported preferences version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type alias for preference persistence
pub type Result<T> = std::result::Result<T, PreferencesError>;
