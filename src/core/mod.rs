//! Core business logic for Domekeeper.
//!
//! # Modules
//!
//! - [`ingest`] - Workbook decoding, header discovery, dome sectioning, cleaning
//! - [`catalog`] - The in-memory dome table with listings and search
//! - [`reconcile`] - Insert-or-update of parsed records against a plant store
//! - [`pipeline`] - Upload flow tying ingestion and reconciliation together
//! - [`guide`] - Sighting verification, summaries and random picks
//!
//! # Upload Workflow
//!
//! 1. **Decode**: Read the first (or configured) worksheet as a grid of cells
//! 2. **Header**: Find the row starting with "Common Name" and name each column
//! 3. **Sections**: Split the rows below on dome marker rows
//! 4. **Normalize**: Clean every row into a plant record
//! 5. **Publish**: Make the new table current for listings and search
//! 6. **Reconcile**: Match records to stored plants and write them in chunks
//!
//! # Example
//!
//! ```rust,no_run
//! use domekeeper::adapters::memory::MemoryStore;
//! use domekeeper::core::catalog::InventoryService;
//! use domekeeper::core::pipeline::UploadPipeline;
//! use domekeeper::core::reconcile::ReconciliationEngine;
//! use std::sync::Arc;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ReconciliationEngine::new(Arc::new(MemoryStore::new()));
//! let pipeline = UploadPipeline::new(Arc::new(InventoryService::new()))
//!     .with_engine(Arc::new(engine));
//!
//! let summary = pipeline.upload(&bytes).await?;
//! println!("{}", summary.message);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod guide;
pub mod ingest;
pub mod pipeline;
pub mod reconcile;
