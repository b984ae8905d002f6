//! Search command implementation

use crate::cli::commands::{print_json, record_line, WorkbookArgs};
use crate::core::catalog::{resolve_fields, search, ALL_LOCATION};
use crate::domain::PlantRecord;
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Dome to search ("All" for every dome)
    #[arg(short, long, default_value = ALL_LOCATION)]
    pub dome: String,

    /// Case-insensitive substring to look for
    #[arg(short, long)]
    pub term: String,

    /// Field to search, by header or column name (repeatable; defaults to the
    /// common and scientific names)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
}

impl SearchArgs {
    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (table, _summary) = match self.workbook.open(config_path).await {
            Ok(loaded) => loaded,
            Err(code) => return Ok(code),
        };

        if table.records(&self.dome).is_none() {
            eprintln!("❌ Unknown dome: {}", self.dome);
            return Ok(2);
        }

        let fields = resolve_fields(&self.fields);
        tracing::debug!(term = %self.term, fields = ?fields, "Searching");

        let matches: Vec<&PlantRecord> = search(&table, &self.dome, &self.term, &fields);

        if self.workbook.json {
            print_json(&matches)?;
            return Ok(0);
        }

        println!("🔍 {} match(es) for '{}' in {}", matches.len(), self.term, self.dome);
        let with_location = self.dome == ALL_LOCATION;
        for record in matches {
            println!("{}", record_line(record, with_location));
        }
        Ok(0)
    }
}
