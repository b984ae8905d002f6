// Domekeeper - Botanical dome inventory ingestion and reconciliation
// Copyright (c) 2025 Domekeeper Contributors
// Licensed under the MIT License

//! # Domekeeper - botanical dome inventory
//!
//! Domekeeper reads a conservatory's inventory workbook, where plants are
//! grouped under dome marker rows, and keeps a persisted plant table in sync
//! with it.
//!
//! ## Overview
//!
//! This library provides:
//! - **Ingestion** of `.xlsx` inventories with a two-row header and dome sections
//! - **Querying** of the parsed table by dome, page, sheet row and substring
//! - **Reconciliation** of parsed records into PostgreSQL or PostgREST in chunks
//! - **Guide** helpers for sighting verification and plant summaries
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (ingest, catalog, reconcile, pipeline, guide)
//! - [`adapters`] - Plant stores and external collaborators
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domekeeper::adapters::database::create_plant_store;
//! use domekeeper::config::load_config;
//! use domekeeper::core::catalog::InventoryService;
//! use domekeeper::core::pipeline::UploadPipeline;
//! use domekeeper::core::reconcile::ReconciliationEngine;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("domekeeper.toml")?;
//!     let store = create_plant_store(&config)?;
//!     store.ensure_schema().await?;
//!
//!     let engine = ReconciliationEngine::from_config(store, &config.reconcile);
//!     let pipeline = UploadPipeline::new(Arc::new(InventoryService::new()))
//!         .with_engine(Arc::new(engine));
//!
//!     let bytes = std::fs::read("inventory.xlsx")?;
//!     let summary = pipeline.upload(&bytes).await?;
//!     println!("{}", summary.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Querying a Loaded Table
//!
//! ```rust,no_run
//! use domekeeper::core::catalog::{search, DEFAULT_SEARCH_FIELDS};
//! use domekeeper::core::ingest::load_workbook;
//!
//! # fn example(bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let table = load_workbook(bytes, None)?;
//!
//! for name in table.locations() {
//!     println!("{name}: {} plants", table.get(name).map_or(0, |l| l.len()));
//! }
//!
//! let ferns = search(&table, "All", "fern", &DEFAULT_SEARCH_FIELDS);
//! println!("{} ferns", ferns.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], whose error is
//! [`domain::DomekeeperError`]. A workbook that cannot be parsed fails the whole
//! load; individual record or store failures during reconciliation are
//! collected in the [`core::reconcile::ReconciliationResult`] instead.
//!
//! ## Logging
//!
//! Domekeeper uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(location = "Desert Dome", plants = 12, "Location loaded");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
