//! In-memory dome table
//!
//! A [`DomeTable`] holds one parsed workbook: the records of every dome in
//! sheet order, plus the derived "All" union. It is immutable once built; a new
//! upload builds a new table.

use crate::domain::{PlantField, PlantRecord};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Name of the union over every location
pub const ALL_LOCATION: &str = "All";

/// Parsed inventory grouped by location
#[derive(Debug, Clone, Default)]
pub struct DomeTable {
    columns: Vec<String>,
    locations: Vec<(String, Vec<PlantRecord>)>,
}

impl DomeTable {
    /// Creates an empty table with the given header names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            locations: Vec::new(),
        }
    }

    /// Appends a section's records
    ///
    /// Records for a location that already exists are appended to it, so two
    /// markers with the same name produce one location. A location called
    /// "All" would be shadowed by the union and is rejected.
    pub fn push_section(&mut self, name: &str, records: Vec<PlantRecord>) {
        if name == ALL_LOCATION {
            tracing::warn!(
                location = name,
                records = records.len(),
                "Skipping section whose name collides with the union"
            );
            return;
        }

        match self.locations.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => {
                tracing::debug!(location = name, "Merging repeated marker into existing location");
                existing.extend(records);
            }
            None => self.locations.push((name.to_string(), records)),
        }
    }

    /// Header names shared by every location
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total number of records, excluding the union
    pub fn total_plants(&self) -> usize {
        self.locations.iter().map(|(_, records)| records.len()).sum()
    }

    /// True when no location holds a record
    pub fn is_empty(&self) -> bool {
        self.total_plants() == 0
    }

    /// Known locations in sheet order, then "All" when any record exists
    pub fn locations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locations.iter().map(|(name, _)| name.as_str()).collect();
        if !self.is_empty() {
            names.push(ALL_LOCATION);
        }
        names
    }

    /// Record count per location, "All" included
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = self
            .locations
            .iter()
            .map(|(name, records)| (name.clone(), records.len()))
            .collect();
        if !self.is_empty() {
            counts.insert(ALL_LOCATION.to_string(), self.total_plants());
        }
        counts
    }

    /// Every record of a location (or the union), in order
    pub fn records(&self, location: &str) -> Option<Vec<&PlantRecord>> {
        if location == ALL_LOCATION {
            if self.is_empty() {
                return None;
            }
            return Some(self.locations.iter().flat_map(|(_, records)| records).collect());
        }
        self.locations
            .iter()
            .find(|(name, _)| name == location)
            .map(|(_, records)| records.iter().collect())
    }

    /// Listing for a location; `None` when the location is unknown
    pub fn get(&self, location: &str) -> Option<Listing<'_>> {
        self.records(location).map(|records| Listing {
            tagged: location == ALL_LOCATION,
            records,
        })
    }

    /// A single record by its source row
    ///
    /// In the union, source rows still identify records uniquely because they
    /// are sheet rows.
    pub fn get_record(&self, location: &str, source_row: usize) -> Option<&PlantRecord> {
        self.records(location)?
            .into_iter()
            .find(|record| record.source_row == source_row)
    }

    /// Offset/limit slice of a location
    pub fn page(&self, location: &str, offset: usize, limit: usize) -> Option<Page<'_>> {
        let listing = self.get(location)?;
        let total = listing.len();
        let records = listing
            .records
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();

        Some(Page {
            total,
            offset,
            limit,
            items: Listing {
                records,
                tagged: listing.tagged,
            },
        })
    }

    /// Per-location counts and columns, plus the total
    pub fn statistics(&self) -> TableStatistics {
        let locations = self
            .locations
            .iter()
            .map(|(name, records)| {
                (
                    name.clone(),
                    LocationStatistics {
                        plant_count: records.len(),
                        columns: self.columns.clone(),
                    },
                )
            })
            .collect();

        TableStatistics {
            locations,
            total_plants: self.total_plants(),
        }
    }

    /// Owned copies of every record, in sheet order
    pub fn all_records(&self) -> Vec<PlantRecord> {
        self.locations
            .iter()
            .flat_map(|(_, records)| records.iter().cloned())
            .collect()
    }
}

/// Records of one location, ready to serialize
///
/// Each record serializes under its sheet header names plus an `index` holding
/// its source row. Only the union carries the `Dome` column.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    records: Vec<&'a PlantRecord>,
    tagged: bool,
}

impl<'a> Listing<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a PlantRecord] {
        &self.records
    }

    /// True when records carry their location
    pub fn is_tagged(&self) -> bool {
        self.tagged
    }
}

impl Serialize for Listing<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(&RecordView {
                record,
                tagged: self.tagged,
            })?;
        }
        seq.end()
    }
}

struct RecordView<'a> {
    record: &'a PlantRecord,
    tagged: bool,
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("index", &self.record.source_row)?;

        for field in PlantField::ALL {
            match field {
                PlantField::Location | PlantField::ImageUrl => continue,
                PlantField::ScientificName | PlantField::Notes | PlantField::Stop => {
                    map.serialize_entry(field.header_name(), &self.record.text(field).unwrap_or(""))?
                }
                f if f.is_flag() => map.serialize_entry(f.header_name(), &self.record.flag(f))?,
                f => map.serialize_entry(f.header_name(), &self.record.text(f))?,
            }
        }

        if self.tagged {
            map.serialize_entry(PlantField::Location.header_name(), &self.record.location)?;
        }
        map.end()
    }
}

/// One page of a listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub items: Listing<'a>,
}

/// Counts and columns of one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStatistics {
    pub plant_count: usize,
    pub columns: Vec<String>,
}

/// Statistics for a whole table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStatistics {
    #[serde(flatten)]
    pub locations: BTreeMap<String, LocationStatistics>,
    pub total_plants: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(common: &str, scientific: &str, location: &str, row: usize) -> PlantRecord {
        PlantRecord::new(scientific, location)
            .with_common_name(common)
            .with_source_row(row)
    }

    fn sample_table() -> DomeTable {
        let mut table = DomeTable::new(vec!["Common Name".to_string(), "Scientific Name".to_string()]);
        table.push_section(
            "Tropical Dome",
            vec![
                record("Boston Fern", "Nephrolepis exaltata", "Tropical Dome", 10),
                record("Bird of Paradise", "Strelitzia reginae", "Tropical Dome", 11),
            ],
        );
        table.push_section(
            "Desert Dome",
            vec![record("Aloe", "Aloe vera", "Desert Dome", 22)],
        );
        table
    }

    #[test]
    fn test_locations_in_sheet_order_with_union() {
        let table = sample_table();
        assert_eq!(table.locations(), vec!["Tropical Dome", "Desert Dome", "All"]);
        assert_eq!(table.total_plants(), 3);
        assert_eq!(table.get("All").unwrap().len(), 3);
        assert!(table.get("Show Dome").is_none());
    }

    #[test]
    fn test_empty_table_has_no_union() {
        let mut table = DomeTable::new(Vec::new());
        table.push_section("Tropical Dome", Vec::new());
        assert_eq!(table.locations(), vec!["Tropical Dome"]);
        assert!(table.get("All").is_none());
        assert_eq!(table.get("Tropical Dome").unwrap().len(), 0);
    }

    #[test]
    fn test_repeated_location_is_merged() {
        let mut table = sample_table();
        table.push_section(
            "Tropical Dome",
            vec![record("Orchid", "Phalaenopsis", "Tropical Dome", 40)],
        );
        assert_eq!(table.locations(), vec!["Tropical Dome", "Desert Dome", "All"]);
        assert_eq!(table.get("Tropical Dome").unwrap().len(), 3);
    }

    #[test]
    fn test_all_named_section_is_rejected() {
        let mut table = sample_table();
        table.push_section("All", vec![record("Rose", "Rosa", "All", 50)]);
        assert_eq!(table.total_plants(), 3);
    }

    #[test]
    fn test_get_record_by_source_row() {
        let table = sample_table();
        let fern = table.get_record("Tropical Dome", 10).unwrap();
        assert_eq!(fern.scientific_name, "Nephrolepis exaltata");
        assert!(table.get_record("Tropical Dome", 22).is_none());
        assert_eq!(
            table.get_record("All", 22).unwrap().scientific_name,
            "Aloe vera"
        );
    }

    #[test]
    fn test_page_slices() {
        let table = sample_table();
        let page = table.page("All", 1, 1).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items.records()[0].scientific_name, "Strelitzia reginae");

        let past_end = table.page("Desert Dome", 5, 10).unwrap();
        assert_eq!(past_end.total, 1);
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn test_listing_tags_only_the_union() {
        let table = sample_table();

        let dome = serde_json::to_value(table.get("Desert Dome").unwrap()).unwrap();
        assert_eq!(dome[0]["index"], 22);
        assert_eq!(dome[0]["Common Name"], "Aloe");
        assert_eq!(dome[0]["Display"], false);
        assert_eq!(dome[0]["Stop"], "N/A");
        assert_eq!(dome[0]["Qty"], serde_json::Value::Null);
        assert!(dome[0].get("Dome").is_none());

        let all = serde_json::to_value(table.get("All").unwrap()).unwrap();
        assert_eq!(all[2]["Dome"], "Desert Dome");
    }

    #[test]
    fn test_statistics_and_counts() {
        let table = sample_table();
        let stats = table.statistics();
        assert_eq!(stats.total_plants, 3);
        assert_eq!(stats.locations["Tropical Dome"].plant_count, 2);
        assert_eq!(stats.locations["Desert Dome"].columns.len(), 2);
        assert!(!stats.locations.contains_key("All"));

        let counts = table.counts();
        assert_eq!(counts["All"], 3);
        assert_eq!(counts["Desert Dome"], 1);
    }
}
