//! Domain models and types for Domekeeper.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Cells** ([`Cell`]) as decoded from spreadsheets or external dictionaries
//! - **Plant records** ([`PlantRecord`], [`PersistedPlant`]) and the field
//!   vocabulary with its aliases ([`PlantField`])
//! - **Identity** ([`PlantId`], [`PersistedKey`])
//! - **Error types** ([`DomekeeperError`], [`ParseError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, DomekeeperError>`]:
//!
//! ```rust
//! use domekeeper::domain::{DomekeeperError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = domekeeper::config::load_config("domekeeper.toml")?;
//!     Ok(())
//! }
//! ```

pub mod cell;
pub mod errors;
pub mod ids;
pub mod plant;
pub mod result;

pub use cell::Cell;
pub use errors::{DomekeeperError, ParseError, StoreError};
pub use ids::PlantId;
pub use plant::{PersistedKey, PersistedPlant, PlantField, PlantRecord, STOP_NOT_APPLICABLE};
pub use result::Result;
