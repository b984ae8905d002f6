//! List command implementation

use crate::cli::commands::{print_json, record_line, WorkbookArgs};
use crate::core::catalog::ALL_LOCATION;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Dome to list ("All" for every dome)
    #[arg(short, long, default_value = ALL_LOCATION)]
    pub dome: String,

    /// Records to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Maximum records to print
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (table, _summary) = match self.workbook.open(config_path).await {
            Ok(loaded) => loaded,
            Err(code) => return Ok(code),
        };

        let Some(page) = table.page(&self.dome, self.offset, self.limit) else {
            eprintln!("❌ Unknown dome: {}", self.dome);
            eprintln!("   Available: {}", table.locations().join(", "));
            return Ok(2);
        };

        if self.workbook.json {
            print_json(&page)?;
            return Ok(0);
        }

        println!(
            "{} ({}-{} of {})",
            self.dome,
            (page.offset + 1).min(page.total),
            (page.offset + page.items.len()).min(page.total),
            page.total
        );
        for record in page.items.records() {
            println!("{}", record_line(record, page.items.is_tagged()));
        }
        Ok(0)
    }
}
