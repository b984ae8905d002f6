//! Reconciliation inputs and their normalization
//!
//! Records reach the engine either already parsed from a sheet or as loose
//! key/value dictionaries whose keys may be header names or column names.
//! Both are cleaned into a [`PlantRecord`] here, once.

use crate::core::ingest::normalize::is_flag_marked;
use crate::domain::{Cell, PlantField, PlantRecord, STOP_NOT_APPLICABLE};
use std::collections::BTreeMap;

/// Loose record keyed by any field alias
pub type RawRecord = BTreeMap<String, Cell>;

/// One record handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileInput {
    Parsed(PlantRecord),
    Raw(RawRecord),
}

impl From<PlantRecord> for ReconcileInput {
    fn from(record: PlantRecord) -> Self {
        ReconcileInput::Parsed(record)
    }
}

impl From<RawRecord> for ReconcileInput {
    fn from(record: RawRecord) -> Self {
        ReconcileInput::Raw(record)
    }
}

/// Cleans an input into a record ready for the store
///
/// Blank, `nan` and NaN values collapse to absence. Fails with a message
/// naming the record when the scientific name or the location is missing.
pub fn normalize_input(input: ReconcileInput) -> Result<PlantRecord, String> {
    let record = match input {
        ReconcileInput::Parsed(record) => clean_parsed(record),
        ReconcileInput::Raw(raw) => from_raw(&raw),
    };

    if record.scientific_name.is_empty() || record.location.is_empty() {
        let label = if !record.scientific_name.is_empty() {
            record.scientific_name.as_str()
        } else {
            record.common_name.as_deref().unwrap_or("Unknown")
        };
        return Err(format!("Plant missing scientific_name or dome: {label}"));
    }

    Ok(record)
}

fn present(value: &str) -> Option<String> {
    let cell = Cell::text(value);
    if cell.is_placeholder() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn clean_parsed(mut record: PlantRecord) -> PlantRecord {
    record.common_name = record.common_name.as_deref().and_then(present);
    record.scientific_name = present(&record.scientific_name).unwrap_or_default();
    record.quantity = record.quantity.as_deref().and_then(present);
    record.location = present(&record.location).unwrap_or_default();
    record.image_url = record.image_url.as_deref().and_then(present);

    if Cell::text(record.notes.as_str()).is_placeholder() {
        record.notes.clear();
    }
    if Cell::text(record.stop.as_str()).is_placeholder() {
        record.stop = STOP_NOT_APPLICABLE.to_string();
    }
    record
}

/// First non-placeholder value among a field's aliases
fn lookup<'a>(raw: &'a RawRecord, field: PlantField) -> Option<&'a Cell> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| raw.get(*alias))
        .find(|cell| !cell.is_placeholder())
}

fn from_raw(raw: &RawRecord) -> PlantRecord {
    let text = |field| lookup(raw, field).and_then(Cell::trimmed_text);

    let mut record = PlantRecord::new(
        text(PlantField::ScientificName).unwrap_or_default(),
        text(PlantField::Location).unwrap_or_default(),
    );
    record.common_name = text(PlantField::CommonName);
    record.quantity = text(PlantField::Quantity);
    record.image_url = text(PlantField::ImageUrl);
    record.notes = lookup(raw, PlantField::Notes)
        .and_then(Cell::to_text)
        .unwrap_or_default();
    record.stop = lookup(raw, PlantField::Stop)
        .and_then(Cell::to_text)
        .unwrap_or_else(|| STOP_NOT_APPLICABLE.to_string());

    for field in PlantField::FLAGS {
        let value = match lookup(raw, field) {
            Some(Cell::Bool(b)) => *b,
            Some(cell) => is_flag_marked(cell),
            None => false,
        };
        record.set_flag(field, value);
    }

    record
}
