//! Raw sheet grid and workbook decoding
//!
//! Decoding is the only place that knows about the container format. Everything
//! downstream sees a rectangular [`RawSheet`] of [`Cell`]s whose row indices
//! match the worksheet's own (0-based) rows.

use crate::domain::{Cell, ParseError};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

static EMPTY_CELL: Cell = Cell::Empty;

/// Ordered 2-D grid of untyped cells, row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawSheet {
    /// Builds a sheet, padding ragged rows to the widest row
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows, width }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (identical for every row)
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// A full row, if it exists
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// A single cell; out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed text of a row's first cell, empty when missing
    pub fn first_cell_text(&self, row: usize) -> String {
        self.cell(row, 0)
            .to_text()
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    /// True when every cell of the row is missing
    pub fn is_row_empty(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(Cell::is_missing))
            .unwrap_or(true)
    }
}

/// Decodes spreadsheet bytes (xlsx, xlsm, xlsb, xls, ods) into a [`RawSheet`]
///
/// Reads the named worksheet, or the first one when `sheet_name` is `None`.
/// Leading empty rows and columns are kept so row indices match the sheet.
///
/// # Errors
///
/// Returns a [`ParseError`] if the bytes are not a readable workbook, the
/// workbook has no sheets, or the named sheet does not exist.
pub fn decode_workbook(bytes: &[u8], sheet_name: Option<&str>) -> Result<RawSheet, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Decode(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let target = match sheet_name {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| ParseError::SheetNotFound(name.to_string()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or(ParseError::EmptyWorkbook)?,
    };

    let range = workbook
        .worksheet_range(&target)
        .map_err(|e| ParseError::Decode(format!("Failed to read sheet '{target}': {e}")))?;

    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for data_row in range.rows() {
        let mut row = vec![Cell::Empty; start_col];
        row.extend(data_row.iter().map(convert_cell));
        rows.push(row);
    }

    tracing::debug!(
        sheet = %target,
        rows = rows.len(),
        "Decoded worksheet"
    );

    Ok(RawSheet::from_rows(rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        // Formula errors carry no usable value
        Data::Error(_) => Cell::Empty,
    }
}
