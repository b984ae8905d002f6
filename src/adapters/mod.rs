//! External system integrations for Domekeeper.
//!
//! - [`database`] - the [`PlantStore`](database::PlantStore) boundary and its factory
//! - [`postgresql`] - pooled PostgreSQL store
//! - [`postgrest`] - PostgREST / Supabase REST store
//! - [`memory`] - process-local store
//! - [`collaborators`] - image classifier, text generator and image store interfaces
//!
//! # Example
//!
//! ```rust,no_run
//! use domekeeper::adapters::database::{create_plant_store, PlantFilter};
//! use domekeeper::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("domekeeper.toml")?;
//! let store = create_plant_store(&config)?;
//! store.ensure_schema().await?;
//!
//! let desert = store.fetch_plants(&PlantFilter::by_location("Desert Dome")).await?;
//! println!("{} plants in the desert dome", desert.len());
//! # Ok(())
//! # }
//! ```

pub mod collaborators;
pub mod database;
pub mod memory;
pub mod postgresql;
pub mod postgrest;
