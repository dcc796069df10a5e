//! Location records: lifecycle, query engine and aggregate reports

pub mod demo;
pub mod report;
pub mod service;

pub use demo::demo_locations;
pub use report::{RateTierCounts, RecencyTierCounts, count_by_rate, count_by_recency};
pub use service::{DynStorage, LocationService};
