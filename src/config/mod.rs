//! Configuration loading and management

use crate::core::KeyValueBackend;
use crate::core::query::PAGE_SIZE;
use crate::core::util::RecencyThresholds;
use crate::storage::{FileBackend, MemoryBackend};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Collection key the location records live under
pub const DEFAULT_COLLECTION_KEY: &str = "locs";

/// Which medium backs the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Process-local map, lost on exit
    #[default]
    Memory,
    /// One JSON file per collection inside `dir`
    File { dir: PathBuf },
    /// LMDB environment inside `dir` (requires the `lmdb` feature)
    Lmdb { dir: PathBuf },
}

impl BackendConfig {
    /// Open the configured backend
    pub fn open(&self) -> Result<Arc<dyn KeyValueBackend>> {
        match self {
            BackendConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
            BackendConfig::File { dir } => Ok(Arc::new(FileBackend::open(dir)?)),
            #[cfg(feature = "lmdb")]
            BackendConfig::Lmdb { dir } => Ok(Arc::new(crate::storage::LmdbBackend::open(dir)?)),
            #[cfg(not(feature = "lmdb"))]
            BackendConfig::Lmdb { .. } => Err(anyhow::anyhow!(
                "lmdb backend requested but locstore was built without the `lmdb` feature"
            )),
        }
    }
}

/// Complete configuration of a location store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key grouping all location records
    pub collection_key: String,

    /// Records per page window
    pub page_size: usize,

    /// Write the demo locations when the collection is empty
    pub seed_demo: bool,

    pub backend: BackendConfig,

    /// Bucket bounds for the recency report
    pub recency: RecencyThresholds,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            page_size: PAGE_SIZE,
            seed_demo: true,
            backend: BackendConfig::default(),
            recency: RecencyThresholds::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
