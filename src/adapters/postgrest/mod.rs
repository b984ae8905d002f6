//! PostgREST / Supabase REST plant store
//!
//! Requests carry the service key both as `apikey` and as a bearer token.
//! Upserts rely on `Prefer: resolution=merge-duplicates` keyed on `id`.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgrestAdapter;
pub use client::PostgrestClient;
pub use models::{PlantPayload, PlantRow};
