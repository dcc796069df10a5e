//! In-memory key-value backend for testing and development

use crate::core::KeyValueBackend;
use crate::core::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory backend implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Clones share the same map.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys written so far
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read()?;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write()?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
