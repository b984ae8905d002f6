//! Spreadsheet ingestion
//!
//! Decodes a workbook and reshapes it into a [`DomeTable`]:
//!
//! 1. [`sheet`] decodes the bytes into a [`RawSheet`]
//! 2. [`header`] finds the two header rows and names every column
//! 3. [`sections`] splits the body on dome marker rows
//! 4. [`normalize`] cleans each section's rows into plant records
//!
//! Any [`ParseError`] aborts the whole load; no partial table is returned.

pub mod header;
pub mod normalize;
pub mod sections;
pub mod sheet;

pub use header::{resolve_header, HeaderSpec, HEADER_SENTINEL};
pub use normalize::{clean_notes, clean_stop, is_flag_marked, normalize_section};
pub use sections::{split_sections, Section, UNSECTIONED_LOCATION};
pub use sheet::{decode_workbook, RawSheet};

use crate::core::catalog::table::DomeTable;
use crate::domain::ParseError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Decodes workbook bytes and builds the dome table
///
/// # Errors
///
/// Returns a [`ParseError`] when the bytes cannot be decoded, the sheet is
/// missing, or no header row exists.
pub fn load_workbook(bytes: &[u8], sheet_name: Option<&str>) -> Result<DomeTable, ParseError> {
    let sheet = decode_workbook(bytes, sheet_name)?;
    load_sheet(&sheet)
}

/// Builds the dome table from an already decoded sheet
pub fn load_sheet(sheet: &RawSheet) -> Result<DomeTable, ParseError> {
    let header = resolve_header(sheet)?;
    let sections = split_sections(sheet, &header);

    let mut table = DomeTable::new(header.names().to_vec());
    for section in &sections {
        let records = normalize_section(sheet, &header, section);
        table.push_section(&section.name, records);
    }

    let summary = LoadSummary::from_table(&table);
    summary.log_summary();

    Ok(table)
}

/// Counts describing a freshly loaded table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Records per location, "All" included
    pub dome_counts: BTreeMap<String, usize>,

    /// Total records, "All" excluded
    pub total_plants: usize,

    /// Location names in sheet order, "All" last
    pub domes: Vec<String>,
}

impl LoadSummary {
    pub fn from_table(table: &DomeTable) -> Self {
        Self {
            dome_counts: table.counts(),
            total_plants: table.total_plants(),
            domes: table.locations().into_iter().map(str::to_string).collect(),
        }
    }

    /// Number of real locations (the union excluded)
    pub fn location_count(&self) -> usize {
        self.domes
            .iter()
            .filter(|name| name.as_str() != crate::core::catalog::table::ALL_LOCATION)
            .count()
    }

    /// Logs the load summary
    pub fn log_summary(&self) {
        tracing::info!(
            locations = self.location_count(),
            total_plants = self.total_plants,
            "Spreadsheet parsed"
        );
        for name in &self.domes {
            if let Some(count) = self.dome_counts.get(name) {
                tracing::debug!(location = %name, plants = count, "Location loaded");
            }
        }
    }
}
