//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Domekeeper configuration file.

use crate::config::load_config;
use crate::config::schema::StoreTarget;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Worksheet: {}",
            config.ingest.sheet_name.as_deref().unwrap_or("(first sheet)")
        );
        println!("  Store Target: {}", config.store_target);

        match config.store_target {
            StoreTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!("  PostgreSQL Target: {}", pg_config.redacted_target());
                    println!("  Max Connections: {}", pg_config.max_connections);
                }
            }
            StoreTarget::PostgREST => {
                if let Some(ref rest_config) = config.postgrest {
                    println!("  PostgREST URL: {}", rest_config.base_url);
                    println!("  Table: {}", rest_config.table);
                }
            }
            StoreTarget::Memory => {
                println!("  (nothing is persisted between runs)");
            }
        }

        println!("  Chunk Size: {}", config.reconcile.chunk_size);
        println!(
            "  Concurrent Batches: {}",
            config.reconcile.max_concurrent_batches
        );
        println!("  Min Confidence: {}", config.guide.min_confidence);
        println!();
        Ok(0)
    }
}
