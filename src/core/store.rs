//! Raw key-value backend trait

use crate::core::error::Result;
use async_trait::async_trait;

/// A medium that maps string keys to serialized text.
///
/// This is the lowest storage layer, the same shape as a browser's local
/// storage: whole values are read and written at once, there is no partial
/// update. Collection stores serialize a full collection into one value.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Read the value under `key`, `None` if it was never written
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}
