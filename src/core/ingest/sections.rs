//! Dome section splitting
//!
//! Below the header block the sheet is divided by marker rows whose first cell
//! names a dome ("Tropical Dome", "Desert Dome", ...). Each marker opens a
//! section that runs until the next marker or the end of the sheet.

use crate::core::ingest::header::HeaderSpec;
use crate::core::ingest::sheet::RawSheet;
use crate::domain::PlantField;

/// Substring identifying a dome marker row
pub const DOME_MARKER: &str = "Dome";

/// Location used when the sheet has plant rows but no dome markers
pub const UNSECTIONED_LOCATION: &str = "All Plants";

/// One contiguous block of rows belonging to a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Location name taken from the marker row
    pub name: String,

    /// Row index of the marker that opened this section, if any
    pub marker_row: Option<usize>,

    /// First row that may hold data
    pub data_start: usize,

    /// One past the last row of the section
    pub end: usize,
}

impl Section {
    /// Row indices that may hold plant data
    ///
    /// The marker row itself is never data, even when a retargeted section
    /// starts above it.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        (self.data_start..self.end).filter(move |&row| Some(row) != self.marker_row)
    }
}

/// Splits the rows under the header into dome sections, in sheet order
///
/// Plant rows sitting between the header and the first marker are folded into
/// the first section. When there are no markers at all, such rows form a
/// single [`UNSECTIONED_LOCATION`] section. A sheet with neither markers nor
/// plant rows yields no sections.
pub fn split_sections(sheet: &RawSheet, header: &HeaderSpec) -> Vec<Section> {
    let body_start = header.body_start();
    let row_count = sheet.row_count();

    let markers: Vec<(usize, String)> = (body_start..row_count)
        .filter_map(|row| {
            let first = sheet.first_cell_text(row);
            first.contains(DOME_MARKER).then_some((row, first))
        })
        .collect();

    let first_marker = markers.first().map(|(row, _)| *row).unwrap_or(row_count);
    let has_leading_data = (body_start..first_marker).any(|row| has_plant_data(sheet, header, row));

    let mut sections: Vec<Section> = markers
        .iter()
        .enumerate()
        .map(|(i, (row, name))| Section {
            name: name.clone(),
            marker_row: Some(*row),
            data_start: row + 1,
            end: markers.get(i + 1).map(|(next, _)| *next).unwrap_or(row_count),
        })
        .collect();

    if has_leading_data {
        match sections.first_mut() {
            Some(first) => {
                tracing::debug!(
                    location = %first.name,
                    rows = first_marker - body_start,
                    "Folding rows above the first marker into the first section"
                );
                first.data_start = body_start;
            }
            None => sections.push(Section {
                name: UNSECTIONED_LOCATION.to_string(),
                marker_row: None,
                data_start: body_start,
                end: row_count,
            }),
        }
    }

    tracing::debug!(sections = sections.len(), "Split sheet into sections");
    sections
}

/// True when the row is non-empty and carries a common or scientific name
pub(crate) fn has_plant_data(sheet: &RawSheet, header: &HeaderSpec, row: usize) -> bool {
    if sheet.is_row_empty(row) {
        return false;
    }
    [PlantField::CommonName, PlantField::ScientificName]
        .into_iter()
        .filter_map(|field| header.column_of(field))
        .any(|col| sheet.cell(row, col).trimmed_text().is_some())
}
