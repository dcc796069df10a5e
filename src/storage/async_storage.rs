//! Collection store over any key-value backend
//!
//! Each collection is kept as a single JSON array under its key. Reads
//! decode the whole array; writes rewrite it. This is the layout the
//! records had in browser local storage, so existing dumps load as-is.

use crate::core::error::{Result, StoreError};
use crate::core::util::{DEFAULT_ID_LENGTH, make_id};
use crate::core::{CollectionStore, Entity, KeyValueBackend};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Random draws tried before `post` gives up on finding an unused id
const MAX_ID_ATTEMPTS: usize = 1000;

/// Decode the collection stored under `key`; `None` if the key is absent.
pub async fn load_from_storage<T, B>(backend: &B, key: &str) -> Result<Option<Vec<T>>>
where
    T: Entity,
    B: KeyValueBackend + ?Sized,
{
    match backend.load(key).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Encode and store a whole collection under `key`
pub async fn save_to_storage<T, B>(backend: &B, key: &str, items: &[T]) -> Result<()>
where
    T: Entity,
    B: KeyValueBackend + ?Sized,
{
    let text = serde_json::to_string(items)?;
    backend.save(key, &text).await
}

/// [`CollectionStore`] implementation backed by a [`KeyValueBackend`]
///
/// Read-modify-write operations (`post`, `put`, `remove`) are serialized
/// through an async mutex so two writers on the same store cannot lose
/// each other's update. Reads do not take the mutex.
///
/// # Example
///
/// ```rust,ignore
/// use locstore::prelude::*;
///
/// let store = AsyncStorage::new(MemoryBackend::new());
/// let saved = store.post("locs", Location::new("Dahab", 5.0, Geo::default())).await?;
/// assert!(saved.id.is_some());
/// ```
pub struct AsyncStorage<B: KeyValueBackend + ?Sized> {
    backend: Arc<B>,
    write_lock: Arc<Mutex<()>>,
    id_length: usize,
}

impl<B: KeyValueBackend> AsyncStorage<B> {
    pub fn new(backend: B) -> Self {
        Self::from_arc(Arc::new(backend))
    }
}

impl<B: KeyValueBackend + ?Sized> AsyncStorage<B> {
    /// Wrap a shared backend (including `Arc<dyn KeyValueBackend>`)
    pub fn from_arc(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
            id_length: DEFAULT_ID_LENGTH,
        }
    }

    /// Length of generated ids
    pub fn with_id_length(mut self, id_length: usize) -> Self {
        self.id_length = id_length.max(1);
        self
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    async fn load<T: Entity>(&self, collection: &str) -> Result<Vec<T>> {
        Ok(load_from_storage(self.backend.as_ref(), collection)
            .await?
            .unwrap_or_default())
    }

    async fn store<T: Entity>(&self, collection: &str, items: &[T]) -> Result<()> {
        save_to_storage(self.backend.as_ref(), collection, items).await
    }

    fn position<T: Entity>(items: &[T], collection: &str, id: &str) -> Result<usize> {
        items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    fn fresh_id<T: Entity>(&self, collection: &str, items: &[T]) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = make_id(self.id_length);
            if !items.iter().any(|item| item.id() == Some(id.as_str())) {
                return Ok(id);
            }
        }
        Err(StoreError::Backend(format!(
            "no free id of length {} in collection '{}' after {} attempts",
            self.id_length, collection, MAX_ID_ATTEMPTS
        )))
    }
}

impl<B: KeyValueBackend + ?Sized> Clone for AsyncStorage<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            write_lock: Arc::clone(&self.write_lock),
            id_length: self.id_length,
        }
    }
}

#[async_trait]
impl<T, B> CollectionStore<T> for AsyncStorage<B>
where
    T: Entity,
    B: KeyValueBackend + ?Sized,
{
    async fn query(&self, collection: &str) -> Result<Vec<T>> {
        self.load(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<T> {
        let items: Vec<T> = self.load(collection).await?;
        items
            .into_iter()
            .find(|item| item.id() == Some(id))
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = self.load(collection).await?;
        let idx = Self::position(&items, collection, id)?;
        items.remove(idx);
        self.store(collection, &items).await?;

        tracing::debug!(collection, id, entity = T::resource_name(), "removed");
        Ok(())
    }

    async fn put(&self, collection: &str, entity: T) -> Result<T> {
        let _guard = self.write_lock.lock().await;
        let id = entity.id().unwrap_or_default().to_string();
        let mut items: Vec<T> = self.load(collection).await?;
        let idx = Self::position(&items, collection, &id)?;
        items[idx] = entity.clone();
        self.store(collection, &items).await?;

        tracing::debug!(collection, id = %id, entity = T::resource_name(), "updated");
        Ok(entity)
    }

    async fn post(&self, collection: &str, mut entity: T) -> Result<T> {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = self.load(collection).await?;
        let id = self.fresh_id(collection, &items)?;
        entity.assign_id(id.clone());
        items.push(entity.clone());
        self.store(collection, &items).await?;

        tracing::debug!(collection, id = %id, entity = T::resource_name(), "created");
        Ok(entity)
    }
}
