//! Error types for tasklist storage backends.

use thiserror::Error;

/// Errors that can occur while reading or writing a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The key cannot be mapped onto the backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Writing the value would exceed the backend's capacity.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes available")]
    QuotaExceeded {
        /// Bytes the backend would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        quota: usize,
    },

    /// Failed to serialize the task snapshot.
    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend could not be reached (for example a poisoned lock).
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
