//! PostgreSQL plant store
//!
//! Rows live in a single `plants` table created by the bundled migration.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::PlantColumns;
