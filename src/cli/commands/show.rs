//! Show command implementation

use crate::cli::commands::{print_json, record_details, WorkbookArgs};
use crate::core::catalog::ALL_LOCATION;
use clap::Args;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Dome holding the record
    #[arg(short, long, default_value = ALL_LOCATION)]
    pub dome: String,

    /// Sheet row of the record (the `index` shown by list)
    #[arg(short, long)]
    pub row: usize,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (table, _summary) = match self.workbook.open(config_path).await {
            Ok(loaded) => loaded,
            Err(code) => return Ok(code),
        };

        let Some(record) = table.get_record(&self.dome, self.row) else {
            eprintln!("❌ No plant at row {} in {}", self.row, self.dome);
            return Ok(2);
        };

        if self.workbook.json {
            print_json(record)?;
            return Ok(0);
        }

        println!("🌿 {}", record.scientific_name);
        for line in record_details(record) {
            println!("{line}");
        }
        Ok(0)
    }
}
