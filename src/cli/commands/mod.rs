//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | partial success (some reconciliation writes failed) |
//! | 2 | configuration or usage error |
//! | 3 | workbook could not be read or parsed |
//! | 4 | store unreachable |
//! | 5 | fatal error |

pub mod init;
pub mod list;
pub mod load;
pub mod search;
pub mod show;
pub mod sync;
pub mod validate;

use crate::config::{load_config, DomekeeperConfig};
use crate::core::catalog::{DomeTable, InventoryService};
use crate::core::ingest::LoadSummary;
use crate::domain::{DomekeeperError, PlantField, PlantRecord, StoreError};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Workbook selection shared by every command that reads a spreadsheet
#[derive(Args, Debug, Clone)]
pub struct WorkbookArgs {
    /// Path to the inventory workbook (.xlsx)
    pub file: PathBuf,

    /// Worksheet to read (overrides ingest.sheet_name)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Exit code for an error that ended a command
pub fn exit_code_for(error: &DomekeeperError) -> i32 {
    match error {
        DomekeeperError::Configuration(_) => 2,
        DomekeeperError::Parse(_) => 3,
        DomekeeperError::Store(StoreError::ConnectionFailed(_)) => 4,
        _ => 5,
    }
}

/// Loads the configuration file, falling back to defaults when it is absent
///
/// Read-only commands work without a configuration file; a file that exists
/// but does not parse or validate is still an error.
pub(crate) fn config_or_default(config_path: &str) -> crate::domain::Result<DomekeeperConfig> {
    if !Path::new(config_path).exists() {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        return Ok(DomekeeperConfig::default());
    }

    load_config(config_path)
}

impl WorkbookArgs {
    /// Reads and parses the workbook
    ///
    /// On failure the problem has already been reported and `Err` holds the
    /// exit code.
    pub(crate) async fn open(
        &self,
        config_path: &str,
    ) -> std::result::Result<(Arc<DomeTable>, LoadSummary), i32> {
        let config = match config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Err(exit_code_for(&e));
            }
        };

        let inventory = match self.sheet.as_ref().or(config.ingest.sheet_name.as_ref()) {
            Some(sheet) => InventoryService::with_sheet(sheet.clone()),
            None => InventoryService::new(),
        };

        let bytes = match tokio::fs::read(&self.file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(file = %self.file.display(), error = %e, "Failed to read workbook");
                eprintln!("❌ Failed to read {}: {e}", self.file.display());
                return Err(3);
            }
        };

        inventory.load(&bytes).await.map_err(|e| {
            tracing::error!(file = %self.file.display(), error = %e, "Failed to parse workbook");
            eprintln!("❌ {e}");
            exit_code_for(&e)
        })
    }
}

/// Prints a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line text rendering of a record
pub(crate) fn record_line(record: &PlantRecord, with_location: bool) -> String {
    let mut line = format!("{:>5}  {}", record.source_row, record.scientific_name);
    if let Some(common) = &record.common_name {
        line.push_str(&format!(" ({common})"));
    }
    if let Some(qty) = &record.quantity {
        line.push_str(&format!("  qty {qty}"));
    }
    if with_location {
        line.push_str(&format!("  [{}]", record.location));
    }
    line
}

/// Multi-line text rendering of every field of a record
pub(crate) fn record_details(record: &PlantRecord) -> Vec<String> {
    let mut lines = vec![format!("  Row: {}", record.source_row)];
    for field in PlantField::ALL {
        let value = if field.is_flag() {
            let marked = record.flag(field) == Some(true);
            String::from(if marked { "yes" } else { "no" })
        } else {
            record.text(field).unwrap_or("-").to_string()
        };
        lines.push(format!("  {}: {value}", field.header_name()));
    }
    lines
}
