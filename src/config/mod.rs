//! Configuration management for Domekeeper.
//!
//! Domekeeper reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOMEKEEPER_<SECTION>_<KEY>` overrides
//! - Default values for everything except store credentials
//! - Per-section validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use domekeeper::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("domekeeper.toml")?;
//!
//! println!("Store: {}", config.store_target);
//! println!("Chunk size: {}", config.reconcile.chunk_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run
//! - [`StoreTarget`] - which store reconciliation writes to
//! - [`IngestConfig`] - which worksheet to read
//! - [`ReconcileConfig`] - chunk size and write concurrency
//! - [`PostgreSQLConfig`] / [`PostgrestConfig`] - store connections
//! - [`GuideConfig`] - sighting verification threshold
//! - [`LoggingConfig`] - JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! store_target = "postgrest"
//!
//! [application]
//! log_level = "info"
//!
//! [reconcile]
//! chunk_size = 100
//!
//! [postgrest]
//! base_url = "https://project.supabase.co/rest/v1"
//! api_key = "${SUPABASE_SERVICE_KEY}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config, CONFIG_PATH_VAR};
pub use schema::{
    ApplicationConfig, DomekeeperConfig, GuideConfig, IngestConfig, LoggingConfig,
    PostgreSQLConfig, PostgrestConfig, ReconcileConfig, StoreTarget,
};
pub use secret::{secret_string, SecretString, SecretValue};
