//! Typed error handling for locstore
//!
//! Every storage-facing operation returns [`Result<T>`], whose error type
//! [`StoreError`] lets callers tell a missing record apart from a broken
//! backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use locstore::prelude::*;
//!
//! match service.get_by_id("GEouN").await {
//!     Ok(loc) => println!("Found: {}", loc.name),
//!     Err(StoreError::NotFound { id, .. }) => println!("No location {}", id),
//!     Err(e) => eprintln!("Storage failure: {}", e),
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The main error type for storage and query operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists in the collection
    #[error("record '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },

    /// A stored collection could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Disk I/O failed (file backend)
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (e.g. an LMDB transaction error)
    #[error("backend error: {0}")]
    Backend(String),

    /// A lock guarding in-process state was poisoned by a panicking writer
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// A blocking storage task was cancelled or panicked
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Whether this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Stable, machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::Serialization(_) => "SERIALIZATION_ERROR",
            StoreError::Io(_) => "IO_ERROR",
            StoreError::Backend(_) => "BACKEND_ERROR",
            StoreError::LockPoisoned(_) => "LOCK_POISONED",
            StoreError::Join(_) => "TASK_FAILED",
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned(err.to_string())
    }
}
