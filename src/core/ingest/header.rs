//! Two-row header resolution
//!
//! The inventory sheet has a title block of arbitrary height, then a main
//! header row starting with `Common Name` and a sub-header row underneath that
//! splits the "Buy New" and "Move It" groups into their two columns each.

use crate::core::ingest::sheet::RawSheet;
use crate::domain::{ParseError, PlantField};

/// First-cell text identifying the main header row
pub const HEADER_SENTINEL: &str = "Common Name";

const BUY_NEW_PREFIX: &str = "Buy New";
const MOVE_IT_PREFIX: &str = "Move It";

/// Canonical column names for one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSpec {
    /// Row index of the main header row
    pub header_row: usize,

    /// One canonical name per column
    names: Vec<String>,
}

impl HeaderSpec {
    /// Column names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the sheet has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// First row after the two header rows
    pub fn body_start(&self) -> usize {
        self.header_row + 2
    }

    /// Column holding a field
    ///
    /// Looks the field up by its canonical header name first, then falls back
    /// to the field's fixed position when the sheet words the header
    /// differently. A position whose header names another field is never
    /// borrowed, so a sheet without the column reads as missing.
    pub fn column_of(&self, field: PlantField) -> Option<usize> {
        self.names
            .iter()
            .position(|name| name == field.header_name())
            .or_else(|| {
                field.column_index().filter(|&i| {
                    self.names.get(i).is_some_and(|name| {
                        PlantField::from_name(name).map_or(true, |owner| owner == field)
                    })
                })
            })
    }
}

/// Locates the header rows of a sheet and builds its [`HeaderSpec`]
///
/// # Errors
///
/// Returns [`ParseError::HeaderNotFound`] when no row's first cell, trimmed,
/// equals [`HEADER_SENTINEL`].
pub fn resolve_header(sheet: &RawSheet) -> Result<HeaderSpec, ParseError> {
    let header_row = (0..sheet.row_count())
        .find(|&row| sheet.first_cell_text(row) == HEADER_SENTINEL)
        .ok_or_else(|| ParseError::HeaderNotFound(HEADER_SENTINEL.to_string()))?;

    let names = (0..sheet.column_count())
        .map(|col| {
            let main = sheet.cell(header_row, col).trimmed_text().unwrap_or_default();
            let sub = sheet
                .cell(header_row + 1, col)
                .trimmed_text()
                .unwrap_or_default();
            column_name(col, &main, &sub)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        header_row = header_row,
        columns = names.len(),
        "Resolved header"
    );

    Ok(HeaderSpec { header_row, names })
}

fn column_name(index: usize, main: &str, sub: &str) -> String {
    match index {
        0 | 1 | 2 | 7 => main.to_string(),
        3 | 4 => prefixed(BUY_NEW_PREFIX, main, sub),
        5 | 6 => prefixed(MOVE_IT_PREFIX, main, sub),
        8 => PlantField::Display.header_name().to_string(),
        9 => PlantField::Stop.header_name().to_string(),
        _ => match (main.is_empty(), sub.is_empty()) {
            (false, false) => format!("{main} - {sub}"),
            (false, true) => main.to_string(),
            (true, false) => sub.to_string(),
            (true, true) => format!("Unnamed_{index}"),
        },
    }
}

fn prefixed(prefix: &str, main: &str, sub: &str) -> String {
    if sub.is_empty() {
        main.to_string()
    } else {
        format!("{prefix} - {sub}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cell;

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| if v.is_empty() { Cell::Empty } else { Cell::text(*v) })
            .collect()
    }

    fn inventory_header() -> Vec<Vec<Cell>> {
        vec![
            text_row(&["Plant Inventory 2024"]),
            text_row(&[]),
            text_row(&[
                "Common Name",
                "Scientific Name",
                "Qty",
                "Buy New",
                "",
                "Move It",
                "",
                "Notes",
                "Display?",
                "Stop?",
                "Owner",
                "",
            ]),
            text_row(&[
                "",
                "",
                "",
                "Won't Survive/Not Worth Moving",
                "Readily Available",
                "Can be done by Domes staff",
                "Requires consult - might not survive move",
                "",
                "",
                "",
                "Team",
                "",
            ]),
        ]
    }

    #[test]
    fn test_resolves_canonical_names() {
        let sheet = RawSheet::from_rows(inventory_header());
        let spec = resolve_header(&sheet).unwrap();

        assert_eq!(spec.header_row, 2);
        assert_eq!(spec.body_start(), 4);
        assert_eq!(spec.len(), sheet.column_count());
        assert_eq!(
            spec.names(),
            &[
                "Common Name",
                "Scientific Name",
                "Qty",
                "Buy New - Won't Survive/Not Worth Moving",
                "Buy New - Readily Available",
                "Move It - Can be done by Domes staff",
                "Move It - Requires consult - might not survive move",
                "Notes",
                "Display",
                "Stop",
                "Owner - Team",
                "Unnamed_11",
            ]
        );
    }

    #[test]
    fn test_header_not_found() {
        let sheet = RawSheet::from_rows(vec![text_row(&["Inventory"]), text_row(&["Name"])]);
        let err = resolve_header(&sheet).unwrap_err();
        assert!(matches!(err, ParseError::HeaderNotFound(_)));
    }

    #[test]
    fn test_sentinel_is_trimmed_but_exact() {
        let sheet = RawSheet::from_rows(vec![
            text_row(&["Common Names"]),
            text_row(&["  Common Name "]),
        ]);
        let spec = resolve_header(&sheet).unwrap();
        assert_eq!(spec.header_row, 1);
    }

    #[test]
    fn test_header_on_last_row_has_empty_sub_header() {
        let sheet = RawSheet::from_rows(vec![text_row(&["Common Name", "Scientific Name", "Qty", "Buy New"])]);
        let spec = resolve_header(&sheet).unwrap();
        assert_eq!(spec.names()[3], "Buy New");
        assert_eq!(spec.len(), 4);
    }

    #[test]
    fn test_column_of_falls_back_to_position() {
        let mut rows = inventory_header();
        rows[3][3] = Cell::text("Not worth it");
        let sheet = RawSheet::from_rows(rows);
        let spec = resolve_header(&sheet).unwrap();

        assert_eq!(spec.names()[3], "Buy New - Not worth it");
        assert_eq!(spec.column_of(PlantField::BuyNewWontSurvive), Some(3));
        assert_eq!(spec.column_of(PlantField::Stop), Some(9));
        assert_eq!(spec.column_of(PlantField::Location), None);
    }

    #[test]
    fn test_column_of_does_not_borrow_another_fields_column() {
        let sheet = RawSheet::from_rows(vec![text_row(&["Common Name", "Notes", "Scientific Name"])]);
        let spec = resolve_header(&sheet).unwrap();

        assert_eq!(spec.column_of(PlantField::ScientificName), Some(2));
        assert_eq!(spec.column_of(PlantField::Notes), Some(1));
        assert_eq!(spec.column_of(PlantField::Quantity), None);
        assert_eq!(spec.column_of(PlantField::Display), None);
    }
}
