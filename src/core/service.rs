//! Collection store trait: the storage adapter contract

use crate::core::entity::Entity;
use crate::core::error::Result;
use async_trait::async_trait;

/// Service trait for collections of entities grouped under a key
///
/// Every operation names the collection it works on, so one store can hold
/// several independent collections. The framework is agnostic to the
/// medium underneath (memory, files, LMDB).
#[async_trait]
pub trait CollectionStore<T: Entity>: Send + Sync {
    /// List every entity of a collection, in storage order.
    ///
    /// A collection that was never written is empty.
    async fn query(&self, collection: &str) -> Result<Vec<T>>;

    /// Get an entity by ID, failing with `NotFound` if absent
    async fn get(&self, collection: &str, id: &str) -> Result<T>;

    /// Delete an entity, failing with `NotFound` if absent
    async fn remove(&self, collection: &str, id: &str) -> Result<()>;

    /// Replace a stored entity in place, matched by its ID
    async fn put(&self, collection: &str, entity: T) -> Result<T>;

    /// Append a new entity under a freshly generated ID
    async fn post(&self, collection: &str, entity: T) -> Result<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Location;

    // The trait can be used in generic contexts
    #[allow(dead_code)]
    async fn generic_count<S>(store: &S) -> Result<usize>
    where
        S: CollectionStore<Location>,
    {
        Ok(store.query("locs").await?.len())
    }

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CollectionStore<Location>) {}

    #[test]
    fn test_traits_compile() {
        // This test just verifies that the trait is correctly defined
        // and can be used both generically and as a trait object
    }
}
