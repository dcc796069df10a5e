//! Shared test harness for storage backend testing
//!
//! Provides helpers for building `Location` records and the
//! `collection_store_tests!` macro that validates any
//! `CollectionStore<Location>` implementation.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod collection_store_tests;

use locstore::core::location::{Geo, Location};

/// Epoch milliseconds used as "now" by deterministic tests
pub const T0: i64 = 1_706_562_160_181;

/// Create an unsaved location with an address.
pub fn create_test_location(name: &str, rate: f64, address: &str) -> Location {
    Location::new(name, rate, Geo::new(0.0, 0.0, 10, address))
}

/// Create an unsaved location with fixed timestamps.
pub fn create_test_location_at(name: &str, rate: f64, created_at: i64) -> Location {
    let mut loc = create_test_location(name, rate, "");
    loc.created_at = created_at;
    loc.updated_at = created_at;
    loc
}

/// Generate `n` diverse unsaved locations.
///
/// Rates cycle 1..=5, names are `Place_{i}`, addresses alternate between
/// two cities.
pub fn sample_batch(n: usize) -> Vec<Location> {
    (0..n)
        .map(|i| {
            create_test_location(
                &format!("Place_{}", i),
                (i % 5 + 1) as f64,
                if i % 2 == 0 { "Eilat, Israel" } else { "Dahab, Egypt" },
            )
        })
        .collect()
}

/// Names of a result, in order
pub fn names(locs: &[Location]) -> Vec<&str> {
    locs.iter().map(|l| l.name.as_str()).collect()
}

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
