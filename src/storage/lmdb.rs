//! LMDB key-value backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store, no external server required.
//! All operations are synchronous (memory-mapped I/O) and are wrapped in
//! `tokio::task::spawn_blocking` for async compatibility.
//!
//! # Databases (named LMDB sub-databases)
//!
//! - `collections` — storage key → serialized collection text
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::KeyValueBackend;
use crate::core::error::{Result, StoreError};
use async_trait::async_trait;
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

impl From<heed::Error> for StoreError {
    fn from(err: heed::Error) -> Self {
        StoreError::Backend(format!("lmdb: {}", err))
    }
}

/// LMDB-backed implementation of [`KeyValueBackend`].
///
/// The `Env` is wrapped in an `Arc` for cheap cloning across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use locstore::storage::{AsyncStorage, LmdbBackend};
///
/// let store = AsyncStorage::new(LmdbBackend::open("/tmp/locstore-lmdb")?);
/// ```
#[derive(Clone)]
pub struct LmdbBackend {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbBackend {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `collections` named database.
    ///
    /// The map size defaults to 64 MB. LMDB does not allocate that much up
    /// front, it is a virtual address space reservation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(64 * 1024 * 1024)
                .max_dbs(4)
                .max_readers(126)
                .open(path.as_ref())?
        };

        let mut wtxn = env.write_txn()?;
        let db: Database<Str, Str> = env.create_database(&mut wtxn, Some("collections"))?;
        wtxn.commit()?;

        tracing::info!(path = %path.as_ref().display(), "opened lmdb backend");

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

#[async_trait]
impl KeyValueBackend for LmdbBackend {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let env = self.env.clone();
        let db = self.db;
        let key = key.to_owned();

        tokio::task::spawn_blocking(move || {
            let rtxn = env.read_txn()?;
            Ok(db.get(&rtxn, &key)?.map(str::to_owned))
        })
        .await?
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let env = self.env.clone();
        let db = self.db;
        let key = key.to_owned();
        let value = value.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut wtxn = env.write_txn()?;
            db.put(&mut wtxn, &key, &value)?;
            wtxn.commit()?;
            Ok(())
        })
        .await?
    }
}
