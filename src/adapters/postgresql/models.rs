//! Row mapping for the `plants` table
//!
//! Writes go through `UNNEST` over one array per column so that a whole chunk
//! is a single statement.

use crate::domain::{PersistedPlant, PlantId, PlantRecord, Result, StoreError, STOP_NOT_APPLICABLE};
use tokio_postgres::Row;

/// Columns written for every record, in bind order
pub const WRITE_COLUMNS: [&str; 12] = [
    "common_name",
    "scientific_name",
    "qty",
    "buy_new_wont_survive",
    "buy_new_readily_available",
    "move_it_staff_can_do",
    "move_it_requires_consult",
    "notes",
    "display",
    "stop",
    "dome",
    "image_url",
];

/// SQL array types matching [`WRITE_COLUMNS`]
const WRITE_TYPES: [&str; 12] = [
    "text[]", "text[]", "text[]", "bool[]", "bool[]", "bool[]", "bool[]", "text[]", "bool[]",
    "text[]", "text[]", "text[]",
];

/// Column-major view of a chunk of records
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlantColumns {
    pub common_name: Vec<Option<String>>,
    pub scientific_name: Vec<String>,
    pub qty: Vec<Option<String>>,
    pub buy_new_wont_survive: Vec<bool>,
    pub buy_new_readily_available: Vec<bool>,
    pub move_it_staff_can_do: Vec<bool>,
    pub move_it_requires_consult: Vec<bool>,
    pub notes: Vec<String>,
    pub display: Vec<bool>,
    pub stop: Vec<String>,
    pub dome: Vec<String>,
    pub image_url: Vec<Option<String>>,
}

impl PlantColumns {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PlantRecord>) -> Self {
        let mut columns = Self::default();
        for record in records {
            columns.common_name.push(record.common_name.clone());
            columns.scientific_name.push(record.scientific_name.clone());
            columns.qty.push(record.quantity.clone());
            columns.buy_new_wont_survive.push(record.buy_new_wont_survive);
            columns
                .buy_new_readily_available
                .push(record.buy_new_readily_available);
            columns.move_it_staff_can_do.push(record.move_it_staff_can_do);
            columns
                .move_it_requires_consult
                .push(record.move_it_requires_consult);
            columns.notes.push(record.notes.clone());
            columns.display.push(record.display);
            columns.stop.push(record.stop.clone());
            columns.dome.push(record.location.clone());
            columns.image_url.push(record.image_url.clone());
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.scientific_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scientific_name.is_empty()
    }

    /// Bind parameters in [`WRITE_COLUMNS`] order
    pub fn params(&self) -> [&(dyn tokio_postgres::types::ToSql + Sync); 12] {
        [
            &self.common_name,
            &self.scientific_name,
            &self.qty,
            &self.buy_new_wont_survive,
            &self.buy_new_readily_available,
            &self.move_it_staff_can_do,
            &self.move_it_requires_consult,
            &self.notes,
            &self.display,
            &self.stop,
            &self.dome,
            &self.image_url,
        ]
    }
}

/// Typed array placeholders for the write columns, starting at `$first`
fn array_params(first: usize) -> String {
    WRITE_TYPES
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("${}::{ty}", first + i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-row insert; the database assigns ids
pub fn insert_statement(table: &str) -> String {
    format!(
        "INSERT INTO {table} ({columns}) SELECT * FROM {unnest}",
        columns = WRITE_COLUMNS.join(", "),
        unnest = format!("UNNEST({})", array_params(1)),
    )
}

/// Id-addressed upsert; `$1` carries the ids as text
///
/// A missing image URL keeps the stored one.
pub fn upsert_statement(table: &str) -> String {
    let updates: Vec<String> = WRITE_COLUMNS
        .iter()
        .map(|column| match *column {
            "image_url" => format!("image_url = COALESCE(EXCLUDED.image_url, {table}.image_url)"),
            other => format!("{other} = EXCLUDED.{other}"),
        })
        .collect();

    format!(
        "INSERT INTO {table} (id, {columns}) \
         SELECT u.id::uuid, u.{select} FROM {unnest} AS u(id, {columns}) \
         ON CONFLICT (id) DO UPDATE SET {updates}, updated_at = NOW()",
        columns = WRITE_COLUMNS.join(", "),
        select = WRITE_COLUMNS.join(", u."),
        unnest = format!("UNNEST($1::text[], {})", array_params(2)),
        updates = updates.join(", "),
    )
}

/// Columns read back, the id rendered as text
pub fn select_columns() -> String {
    format!("id::text AS id, {}", WRITE_COLUMNS.join(", "))
}

/// Maps a selected row onto a persisted plant
pub fn plant_from_row(row: &Row) -> Result<PersistedPlant> {
    let get_text = |column: &str| -> Result<Option<String>> {
        row.try_get::<_, Option<String>>(column)
            .map_err(|e| StoreError::InvalidResponse(format!("column {column}: {e}")).into())
    };
    let get_flag = |column: &str| -> Result<bool> {
        row.try_get::<_, Option<bool>>(column)
            .map(|v| v.unwrap_or(false))
            .map_err(|e| StoreError::InvalidResponse(format!("column {column}: {e}")).into())
    };

    let id = get_text("id")?
        .and_then(|id| PlantId::new(id).ok())
        .ok_or_else(|| StoreError::InvalidResponse("row without id".to_string()))?;

    let mut record = PlantRecord::new(
        get_text("scientific_name")?.unwrap_or_default(),
        get_text("dome")?.unwrap_or_default(),
    );
    record.common_name = get_text("common_name")?;
    record.quantity = get_text("qty")?;
    record.buy_new_wont_survive = get_flag("buy_new_wont_survive")?;
    record.buy_new_readily_available = get_flag("buy_new_readily_available")?;
    record.move_it_staff_can_do = get_flag("move_it_staff_can_do")?;
    record.move_it_requires_consult = get_flag("move_it_requires_consult")?;
    record.notes = get_text("notes")?.unwrap_or_default();
    record.display = get_flag("display")?;
    record.stop = get_text("stop")?.unwrap_or_else(|| STOP_NOT_APPLICABLE.to_string());
    record.image_url = get_text("image_url")?;

    Ok(PersistedPlant { id, record })
}
