//! Entity trait defining what a collection store needs from a record type

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every record kept in a collection.
///
/// A collection store only needs to read and assign the record id; all
/// other fields are opaque to it and travel through serde.
///
/// An entity without an id has never been stored. The store assigns one
/// on first insertion and the id is immutable afterwards.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The resource name used in log lines and errors (e.g., "location")
    fn resource_name() -> &'static str;

    /// Get the unique identifier, if one has been assigned
    fn id(&self) -> Option<&str>;

    /// Assign the identifier. Called by stores on first insertion only.
    fn assign_id(&mut self, id: String);

    /// Check if the entity has already been stored
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
