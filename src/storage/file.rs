//! File-system key-value backend: one JSON file per key.
//!
//! `save("locs", ..)` writes `<dir>/locs.json`. Writes go to a temporary
//! sibling file first and are renamed into place, so a crash mid-write
//! leaves the previous value intact. File I/O is blocking and runs inside
//! `tokio::task::spawn_blocking`.

use crate::core::KeyValueBackend;
use crate::core::error::{Result, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory-backed implementation of [`KeyValueBackend`]
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: Arc<PathBuf>,
}

impl FileBackend {
    /// Use (and create if needed) `dir` as the storage directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        tracing::info!(dir = %dir.as_ref().display(), "opened file backend");
        Ok(Self {
            dir: Arc::new(dir.as_ref().to_path_buf()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::Backend(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        tokio::task::spawn_blocking(move || match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        })
        .await?
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let value = value.to_owned();

        tokio::task::spawn_blocking(move || {
            std::fs::write(&tmp, value)?;
            std::fs::rename(&tmp, &path)?;
            Ok(())
        })
        .await?
    }
}
