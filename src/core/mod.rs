//! Core module containing fundamental traits and types for the crate

pub mod entity;
pub mod error;
pub mod location;
pub mod query;
pub mod service;
pub mod store;
pub mod util;

pub use entity::Entity;
pub use error::{Result, StoreError};
pub use location::{Geo, Location};
pub use query::{Direction, FilterBy, FilterUpdate, QueryOptions, SortBy};
pub use service::CollectionStore;
pub use store::KeyValueBackend;
pub use util::{Clock, Elapsed, ManualClock, RecencyThresholds, SystemClock};
