//! Reconciliation of incoming plant records with the persisted store
//!
//! - [`input`] - accepted record shapes and their normalization
//! - [`plan`] - partition into inserts and id-addressed updates
//! - [`engine`] - the chunked, best-effort writer
//! - [`summary`] - counts and accumulated errors

pub mod engine;
pub mod input;
pub mod plan;
pub mod summary;

pub use engine::{ReconciliationEngine, DEFAULT_CHUNK_SIZE};
pub use input::{normalize_input, RawRecord, ReconcileInput};
pub use plan::ReconciliationPlan;
pub use summary::{BatchOutcome, ReconcileError, ReconcileErrorKind, ReconciliationResult};
