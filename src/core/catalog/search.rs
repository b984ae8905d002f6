//! Substring search over a location's records

use crate::core::catalog::table::DomeTable;
use crate::domain::{PlantField, PlantRecord};

/// Fields searched when the caller does not name any
pub const DEFAULT_SEARCH_FIELDS: [PlantField; 2] = [PlantField::CommonName, PlantField::ScientificName];

/// Resolves caller-supplied field names, dropping unknown ones
///
/// Accepts header names or snake_case column names. An empty input selects
/// [`DEFAULT_SEARCH_FIELDS`].
pub fn resolve_fields<S: AsRef<str>>(names: &[S]) -> Vec<PlantField> {
    if names.is_empty() {
        return DEFAULT_SEARCH_FIELDS.to_vec();
    }

    names
        .iter()
        .filter_map(|name| {
            let field = PlantField::from_name(name.as_ref());
            if field.is_none() {
                tracing::debug!(field = name.as_ref(), "Ignoring unknown search field");
            }
            field
        })
        .collect()
}

/// Records of `location` where `term` occurs, case-insensitively, in any of
/// `fields`
///
/// Unknown locations and empty terms yield nothing. Flag fields never match.
pub fn search<'a>(
    table: &'a DomeTable,
    location: &str,
    term: &str,
    fields: &[PlantField],
) -> Vec<&'a PlantRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let Some(records) = table.records(location) else {
        return Vec::new();
    };

    let hits: Vec<&PlantRecord> = records
        .into_iter()
        .filter(|record| matches(record, &needle, fields))
        .collect();

    tracing::debug!(
        location = location,
        term = term,
        hits = hits.len(),
        "Search completed"
    );

    hits
}

fn matches(record: &PlantRecord, needle: &str, fields: &[PlantField]) -> bool {
    fields.iter().any(|&field| {
        record
            .text(field)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DomeTable {
        let mut table = DomeTable::new(Vec::new());
        table.push_section(
            "Tropical Dome",
            vec![
                PlantRecord::new("Nephrolepis exaltata", "Tropical Dome")
                    .with_common_name("Boston Fern")
                    .with_source_row(10),
                PlantRecord::new("Adiantum raddianum", "Tropical Dome")
                    .with_common_name("Maidenhair")
                    .with_source_row(11),
                PlantRecord::new("Ficus lyrata", "Tropical Dome").with_source_row(12),
            ],
        );
        table.push_section(
            "Desert Dome",
            vec![PlantRecord::new("Pteris fern-like", "Desert Dome").with_source_row(20)],
        );
        table
    }

    #[test]
    fn test_search_is_case_insensitive_or_across_fields() {
        let table = table();
        let hits = search(&table, "Tropical Dome", "FERN", &DEFAULT_SEARCH_FIELDS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_row, 10);

        let hits = search(&table, "Tropical Dome", "rad", &DEFAULT_SEARCH_FIELDS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].common_name.as_deref(), Some("Maidenhair"));
    }

    #[test]
    fn test_search_union_and_unknown_location() {
        let table = table();
        assert_eq!(search(&table, "All", "fern", &DEFAULT_SEARCH_FIELDS).len(), 2);
        assert!(search(&table, "Show Dome", "fern", &DEFAULT_SEARCH_FIELDS).is_empty());
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        let table = table();
        assert!(search(&table, "All", "", &DEFAULT_SEARCH_FIELDS).is_empty());
    }

    #[test]
    fn test_resolve_fields() {
        assert_eq!(resolve_fields::<&str>(&[]), DEFAULT_SEARCH_FIELDS.to_vec());
        assert_eq!(
            resolve_fields(&["notes", "Colour", "Scientific Name"]),
            vec![PlantField::Notes, PlantField::ScientificName]
        );
    }

    #[test]
    fn test_flag_fields_never_match() {
        let table = table();
        let hits = search(&table, "All", "false", &[PlantField::Display]);
        assert!(hits.is_empty());
    }
}
