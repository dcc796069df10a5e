//! Location service: lifecycle, queries and reports over a collection store

use crate::config::{DEFAULT_COLLECTION_KEY, StoreConfig};
use crate::core::error::Result;
use crate::core::location::Location;
use crate::core::query::{FilterBy, FilterUpdate, QueryOptions, SortBy};
use crate::core::util::{Clock, RecencyThresholds, SystemClock};
use crate::core::{CollectionStore, Entity, KeyValueBackend};
use crate::locations::demo::demo_locations;
use crate::locations::report::{RateTierCounts, RecencyTierCounts, count_by_rate, count_by_recency};
use crate::storage::AsyncStorage;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Store type produced by [`LocationService::open`]
pub type DynStorage = AsyncStorage<dyn KeyValueBackend>;

/// Manages the location collection of one store.
///
/// The service keeps the current [`QueryOptions`] for callers that set
/// criteria once and query repeatedly. [`query`](Self::query) copies those
/// options when it starts, so a setter running concurrently affects the
/// next query only. [`query_with`](Self::query_with) takes the options
/// explicitly and leaves the stored ones alone.
///
/// # Example
///
/// ```rust,ignore
/// use locstore::prelude::*;
///
/// let service = LocationService::new(AsyncStorage::new(MemoryBackend::new()));
/// service.save(Location::new("Dahab, Egypt", 5.0, Geo::default())).await?;
///
/// service.set_filter_by(FilterUpdate::min_rate(4.0));
/// service.set_sort_by(SortBy::ByName(Direction::Ascending));
/// let locs = service.query().await?;
/// ```
pub struct LocationService<S> {
    store: Arc<S>,
    collection: String,
    clock: Arc<dyn Clock>,
    recency: RecencyThresholds,
    options: RwLock<QueryOptions>,
}

impl<S: CollectionStore<Location>> LocationService<S> {
    /// Service over `store` with the default collection key, wall clock
    /// and query options
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Self {
            store,
            collection: DEFAULT_COLLECTION_KEY.to_string(),
            clock: Arc::new(SystemClock),
            recency: RecencyThresholds::default(),
            options: RwLock::new(QueryOptions::default()),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_recency_thresholds(mut self, recency: RecencyThresholds) -> Self {
        self.recency = recency;
        self
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.write_options().page_size = page_size.max(1);
        self
    }

    /// Apply every tunable of `config` except the backend
    pub fn configured(self, config: &StoreConfig) -> Self {
        self.with_collection(config.collection_key.clone())
            .with_recency_thresholds(config.recency)
            .with_page_size(config.page_size)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn read_options(&self) -> RwLockReadGuard<'_, QueryOptions> {
        self.options.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_options(&self) -> RwLockWriteGuard<'_, QueryOptions> {
        self.options.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Query engine ===

    /// Snapshot of the stored query options
    pub fn options(&self) -> QueryOptions {
        self.read_options().clone()
    }

    /// Query with the stored options
    pub async fn query(&self) -> Result<Vec<Location>> {
        let options = self.options();
        self.query_with(&options).await
    }

    /// Query with explicit, request-scoped options
    pub async fn query_with(&self, options: &QueryOptions) -> Result<Vec<Location>> {
        let locs = self.store.query(&self.collection).await?;
        let fetched = locs.len();
        let result = options.apply(locs);

        tracing::debug!(
            collection = %self.collection,
            fetched,
            returned = result.len(),
            sort = ?options.sort,
            page = ?options.page,
            "location query"
        );
        Ok(result)
    }

    /// Merge a partial filter update; returns the resulting filter
    pub fn set_filter_by(&self, update: FilterUpdate) -> FilterBy {
        let mut options = self.write_options();
        options.filter.merge(update);
        tracing::debug!(filter = ?options.filter, "filter updated");
        options.filter.clone()
    }

    /// Replace the sort criteria
    pub fn set_sort_by(&self, sort: SortBy) {
        self.write_options().sort = sort;
        tracing::debug!(sort = ?sort, "sort updated");
    }

    /// Select a page window, or `None` for all matches
    pub fn set_page_index(&self, page: Option<usize>) {
        self.write_options().page = page;
    }

    // === Lifecycle ===

    pub async fn get_by_id(&self, id: &str) -> Result<Location> {
        self.store.get(&self.collection, id).await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.store.remove(&self.collection, id).await
    }

    /// Create or update a location.
    ///
    /// `updated_at` is always set to now. A location without an id is
    /// created: it also gets `created_at = updated_at` and a new id.
    pub async fn save(&self, mut loc: Location) -> Result<Location> {
        let now = self.clock.now_ms();
        loc.touch(now);

        if loc.is_persisted() {
            self.store.put(&self.collection, loc).await
        } else {
            loc.created_at = now;
            self.store.post(&self.collection, loc).await
        }
    }

    /// Write the demo locations if the collection is empty.
    ///
    /// Returns the number of records written.
    pub async fn seed_demo_data(&self) -> Result<usize> {
        let existing = self.store.query(&self.collection).await?;
        if !existing.is_empty() {
            return Ok(0);
        }

        let demo = demo_locations(self.clock.now_ms());
        let count = demo.len();
        for loc in demo {
            self.store.post(&self.collection, loc).await?;
        }

        tracing::info!(collection = %self.collection, count, "seeded demo locations");
        Ok(count)
    }

    // === Reports ===

    /// Count every record per rating tier, ignoring the filter
    pub async fn count_by_rate_tier(&self) -> Result<RateTierCounts> {
        let locs = self.store.query(&self.collection).await?;
        Ok(count_by_rate(&locs))
    }

    /// Count every record per time since last update, ignoring the filter
    pub async fn count_by_recency_tier(&self) -> Result<RecencyTierCounts> {
        let locs = self.store.query(&self.collection).await?;
        Ok(count_by_recency(&locs, self.clock.now_ms(), &self.recency))
    }
}

impl LocationService<DynStorage> {
    /// Open the configured backend, build the service and seed demo data
    /// when enabled
    pub async fn open(config: &StoreConfig) -> anyhow::Result<Self> {
        let backend = config.backend.open()?;
        let service = Self::new(AsyncStorage::from_arc(backend)).configured(config);

        if config.seed_demo {
            service.seed_demo_data().await?;
        }
        Ok(service)
    }
}
