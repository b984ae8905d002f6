//! Plant store abstraction
//!
//! Every persisted store (PostgreSQL, PostgREST, in-memory) implements
//! [`PlantStore`]. The store owns record identity: callers never invent ids,
//! they read them back through [`PlantStore::fetch_plants`].

use crate::domain::{PersistedPlant, PlantId, PlantRecord, Result};
use async_trait::async_trait;

/// Equality filter for bulk reads
///
/// Unset fields do not constrain the read, so `PlantFilter::default()` reads
/// every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantFilter {
    pub id: Option<PlantId>,
    pub scientific_name: Option<String>,
    pub location: Option<String>,
}

impl PlantFilter {
    /// Matches every stored plant
    pub fn all() -> Self {
        Self::default()
    }

    /// Plants of one location
    pub fn by_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Plants with a scientific name, optionally restricted to one location
    pub fn by_scientific_name(scientific_name: impl Into<String>, location: Option<String>) -> Self {
        Self {
            scientific_name: Some(scientific_name.into()),
            location,
            ..Self::default()
        }
    }

    /// A single plant by id
    pub fn by_id(id: PlantId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// True when no field constrains the read
    pub fn is_unfiltered(&self) -> bool {
        self.id.is_none() && self.scientific_name.is_none() && self.location.is_none()
    }

    /// Applies the filter to a stored plant
    pub fn matches(&self, plant: &PersistedPlant) -> bool {
        self.id.as_ref().map_or(true, |id| *id == plant.id)
            && self
                .scientific_name
                .as_deref()
                .map_or(true, |name| name == plant.record.scientific_name)
            && self
                .location
                .as_deref()
                .map_or(true, |location| location == plant.record.location)
    }
}

/// Persisted plant store
///
/// Writes are addressed in bulk: one call per chunk of records. An error from
/// a bulk call means the store gives no guarantee about which rows of that
/// call were written.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the plants table exists, creating it if necessary
    ///
    /// Stores that cannot create tables treat this as a reachability check.
    async fn ensure_schema(&self) -> Result<()>;

    /// Read stored plants matching `filter`
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails. Callers treat this as fatal.
    async fn fetch_plants(&self, filter: &PlantFilter) -> Result<Vec<PersistedPlant>>;

    /// Create one row per record; the store assigns ids
    ///
    /// Returns the number of rows created.
    async fn insert_many(&self, records: &[PlantRecord]) -> Result<usize>;

    /// Overwrite the rows with the given ids
    ///
    /// Returns the number of rows written.
    async fn upsert_many(&self, records: &[(PlantId, PlantRecord)]) -> Result<usize>;

    /// Human-readable store name for logs
    fn store_name(&self) -> &str;
}
