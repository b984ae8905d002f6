//! Queryable in-memory inventory
//!
//! - [`table`] - the per-location record table and its listings
//! - [`search`] - substring search across chosen fields
//! - [`service`] - the shared handle to the current table

pub mod search;
pub mod service;
pub mod table;

pub use search::{resolve_fields, search, DEFAULT_SEARCH_FIELDS};
pub use service::InventoryService;
pub use table::{DomeTable, Listing, LocationStatistics, Page, TableStatistics, ALL_LOCATION};
