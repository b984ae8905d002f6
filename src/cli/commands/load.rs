//! Load command implementation
//!
//! Parses a workbook and reports what it contains without touching a store.

use crate::cli::commands::{print_json, WorkbookArgs};
use clap::Args;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,
}

impl LoadArgs {
    /// Execute the load command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.workbook.file.display(), "Loading workbook");

        let (_table, summary) = match self.workbook.open(config_path).await {
            Ok(loaded) => loaded,
            Err(code) => return Ok(code),
        };

        if self.workbook.json {
            print_json(&summary)?;
            return Ok(0);
        }

        println!("✅ Loaded {}", self.workbook.file.display());
        println!();
        println!("Domes:");
        for name in &summary.domes {
            let count = summary.dome_counts.get(name).copied().unwrap_or(0);
            println!("  {name}: {count} plants");
        }
        println!();
        println!("Total plants: {}", summary.total_plants);
        Ok(0)
    }
}
