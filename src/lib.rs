//! # locstore
//!
//! A local persistence and query layer for rated, geolocated places.
//!
//! ## Features
//!
//! - **Pluggable storage**: collections are JSON arrays under a key in any
//!   [`KeyValueBackend`](core::KeyValueBackend): memory, a directory of
//!   files, or LMDB (feature `lmdb`)
//! - **Query pipeline**: text/rating filter, page window, then one sort key
//! - **Reports**: counts per rating tier and per time since last update
//! - **Automatic timestamps**: `created_at` and `updated_at` managed on save
//! - **Configuration-based**: backend and tunables from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use locstore::prelude::*;
//!
//! let service = LocationService::<DynStorage>::open(&StoreConfig::default()).await?;
//!
//! service.set_filter_by(FilterUpdate::txt("beach"));
//! service.set_sort_by(SortBy::ByName(Direction::Ascending));
//! for loc in service.query().await? {
//!     println!("{} ({})", loc.name, loc.rate);
//! }
//!
//! let tiers = service.count_by_rate_tier().await?;
//! println!("{} high, {} medium, {} low", tiers.high, tiers.medium, tiers.low);
//! ```

pub mod config;
pub mod core;
pub mod locations;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        error::{Result, StoreError},
        location::{Geo, Location},
        query::{Direction, FilterBy, FilterUpdate, QueryOptions, SortBy},
        service::CollectionStore,
        store::KeyValueBackend,
        util::{Clock, Elapsed, ManualClock, RecencyThresholds, SystemClock},
    };

    // === Locations ===
    pub use crate::locations::{DynStorage, LocationService, RateTierCounts, RecencyTierCounts};

    // === Storage ===
    pub use crate::storage::{AsyncStorage, FileBackend, MemoryBackend};
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbBackend;

    // === Config ===
    pub use crate::config::{BackendConfig, StoreConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
