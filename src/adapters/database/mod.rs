//! Store abstraction layer
//!
//! A trait-based boundary so the reconciliation engine works the same way
//! against PostgreSQL, PostgREST or the in-memory store.

pub mod factory;
pub mod traits;

pub use factory::create_plant_store;
pub use traits::{PlantFilter, PlantStore};
