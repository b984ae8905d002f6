//! Sync command implementation
//!
//! Loads a workbook and reconciles every record against the configured store.

use crate::adapters::database::create_plant_store;
use crate::cli::commands::{exit_code_for, print_json};
use crate::config::load_config;
use crate::core::catalog::InventoryService;
use crate::core::pipeline::UploadPipeline;
use crate::core::reconcile::ReconciliationEngine;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// How many reconciliation errors the text summary prints
const SHOWN_ERRORS: usize = 10;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the inventory workbook (.xlsx)
    pub file: PathBuf,

    /// Worksheet to read (overrides ingest.sheet_name)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Plan the reconciliation without writing to the store
    #[arg(long)]
    pub dry_run: bool,

    /// Override reconcile.chunk_size
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(chunk_size) = self.chunk_size {
            tracing::info!(chunk_size, "Overriding chunk size from CLI");
            config.reconcile.chunk_size = chunk_size;
        }
        if let Some(sheet) = &self.sheet {
            config.ingest.sheet_name = Some(sheet.clone());
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.application.dry_run;
        if dry_run && !self.json {
            println!("🔍 DRY RUN MODE - No data will be written to the store");
            println!();
        }

        let bytes = match tokio::fs::read(&self.file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(file = %self.file.display(), error = %e, "Failed to read workbook");
                eprintln!("❌ Failed to read {}: {e}", self.file.display());
                return Ok(3);
            }
        };

        let store = match create_plant_store(&config) {
            Ok(store) => store,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create plant store");
                eprintln!("❌ Failed to initialize store: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        // A dry run only reads, so it must not create tables.
        let ready = if dry_run {
            store.test_connection().await
        } else {
            store.ensure_schema().await
        };
        if let Err(e) = ready {
            tracing::error!(store = store.store_name(), error = %e, "Store is not reachable");
            eprintln!("❌ Store {} is not reachable: {e}", store.store_name());
            return Ok(4); // Connection error exit code
        }

        let inventory = match &config.ingest.sheet_name {
            Some(sheet) => InventoryService::with_sheet(sheet.clone()),
            None => InventoryService::new(),
        };
        let engine = ReconciliationEngine::from_config(store, &config.reconcile).with_dry_run(dry_run);
        let pipeline = UploadPipeline::new(Arc::new(inventory)).with_engine(Arc::new(engine));

        let summary = match pipeline.upload(&bytes).await {
            Ok(summary) => summary,
            Err(e) => {
                log_error_with_context!(&e, "Upload failed");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let code = if summary.is_complete() { 0 } else { 1 };

        if self.json {
            print_json(&summary)?;
            return Ok(code);
        }

        println!("📊 {}", summary.message);
        println!("  Domes: {}", summary.domes.join(", "));
        println!("  Total plants: {}", summary.total_plants);

        if let Some(result) = &summary.reconciliation {
            let (saved, updated) = if result.dry_run {
                ("Would insert", "Would update")
            } else {
                ("Inserted", "Updated")
            };
            println!("  {saved}: {}", result.saved);
            println!("  {updated}: {}", result.updated);

            if !result.errors.is_empty() {
                println!();
                println!("  ⚠️  Errors ({}):", result.error_count());
                for error in result.errors.iter().take(SHOWN_ERRORS) {
                    println!("    - [{}] {}", error.kind, error.message);
                }
                if result.errors.len() > SHOWN_ERRORS {
                    println!("    ... and {} more", result.errors.len() - SHOWN_ERRORS);
                }
            }
        }

        Ok(code)
    }
}
