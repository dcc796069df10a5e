//! Location record model

use crate::core::entity::Entity;
use serde::{Deserialize, Serialize};

/// Geographic position and address of a location.
///
/// Every field falls back to zero / empty string when missing, both when
/// building a record and when decoding stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: f64,
    pub lng: f64,
    pub zoom: i32,
    pub address: String,
}

impl Geo {
    pub fn new(lat: f64, lng: f64, zoom: i32, address: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            zoom,
            address: address.into(),
        }
    }
}

/// A named, rated place.
///
/// Stored as camelCase JSON:
///
/// ```json
/// {
///   "id": "GEouN",
///   "name": "Dahab, Egypt",
///   "rate": 5,
///   "geo": { "lat": 28.5096676, "lng": 34.5165187, "zoom": 11, "address": "Dahab, South Sinai, Egypt" },
///   "createdAt": 1706562160181,
///   "updatedAt": 1706562160181
/// }
/// ```
///
/// `rate` is expected in 1..=5 but never validated. Timestamps are epoch
/// milliseconds; `created_at <= updated_at` once the record has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub rate: f64,

    #[serde(default)]
    pub geo: Geo,

    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub updated_at: i64,
}

impl Location {
    /// Create an unsaved location. Timestamps and id are set on save.
    pub fn new(name: impl Into<String>, rate: f64, geo: Geo) -> Self {
        Self {
            id: None,
            name: name.into(),
            rate,
            geo,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Mark the record as modified at `now_ms`
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms;
    }
}

impl Entity for Location {
    fn resource_name() -> &'static str {
        "location"
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
