//! Record normalization
//!
//! Turns the rows of one [`Section`] into [`PlantRecord`]s, cleaning the
//! inconsistent missing-value encodings the sheet uses along the way.

use crate::core::ingest::header::HeaderSpec;
use crate::core::ingest::sections::{has_plant_data, Section};
use crate::core::ingest::sheet::RawSheet;
use crate::domain::cell::NAN_LITERAL;
use crate::domain::{Cell, PlantField, PlantRecord, STOP_NOT_APPLICABLE};

/// Text marking a flag column as set
pub const FLAG_MARK: &str = "x";

static ABSENT: Cell = Cell::Empty;

/// True iff the cell's trimmed, lower-cased text is exactly `x`
pub fn is_flag_marked(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => s.trim().to_lowercase() == FLAG_MARK,
        _ => false,
    }
}

/// Notes text: missing or literal `nan` becomes empty, anything else is kept as-is
pub fn clean_notes(cell: &Cell) -> String {
    text_or(cell, "")
}

/// Stop reason: missing or literal `nan` becomes `N/A`, anything else is kept as-is
pub fn clean_stop(cell: &Cell) -> String {
    text_or(cell, STOP_NOT_APPLICABLE)
}

fn text_or(cell: &Cell, fallback: &str) -> String {
    match cell.to_text() {
        Some(text) if text != NAN_LITERAL => text,
        _ => fallback.to_string(),
    }
}

/// Normalizes every surviving row of a section
///
/// Empty rows and rows without either name are dropped. `source_row` is the
/// 1-based sheet row the record would occupy if every dropped row were
/// removed from the section.
pub fn normalize_section(sheet: &RawSheet, header: &HeaderSpec, section: &Section) -> Vec<PlantRecord> {
    let columns = FieldColumns::new(header);

    let records: Vec<PlantRecord> = section
        .rows()
        .filter(|&row| has_plant_data(sheet, header, row))
        .enumerate()
        .map(|(offset, row)| {
            let mut record = columns.read(sheet, row, &section.name);
            record.source_row = offset + section.data_start + 1;
            record
        })
        .collect();

    tracing::debug!(
        location = %section.name,
        records = records.len(),
        "Normalized section"
    );

    records
}

/// Column positions of each field, resolved once per sheet
struct FieldColumns {
    positions: Vec<(PlantField, Option<usize>)>,
}

impl FieldColumns {
    fn new(header: &HeaderSpec) -> Self {
        let positions = PlantField::ALL
            .iter()
            .map(|&field| (field, header.column_of(field)))
            .collect();
        Self { positions }
    }

    fn cell<'a>(&self, sheet: &'a RawSheet, row: usize, field: PlantField) -> &'a Cell {
        let col = self
            .positions
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, col)| *col);
        match col {
            Some(col) => sheet.cell(row, col),
            None => &ABSENT,
        }
    }

    fn read(&self, sheet: &RawSheet, row: usize, location: &str) -> PlantRecord {
        let scientific_name = self
            .cell(sheet, row, PlantField::ScientificName)
            .trimmed_text()
            .unwrap_or_default();

        let mut record = PlantRecord::new(scientific_name, location);
        record.common_name = self.cell(sheet, row, PlantField::CommonName).trimmed_text();
        record.quantity = self.cell(sheet, row, PlantField::Quantity).trimmed_text();
        record.notes = clean_notes(self.cell(sheet, row, PlantField::Notes));
        record.stop = clean_stop(self.cell(sheet, row, PlantField::Stop));

        for field in PlantField::FLAGS {
            record.set_flag(field, is_flag_marked(self.cell(sheet, row, field)));
        }

        record
    }
}
