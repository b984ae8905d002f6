//! Plant records and their field vocabulary
//!
//! [`PlantRecord`] is the single canonical record type. Sheets, the store, and
//! external dictionaries all name the same fields differently; [`PlantField`]
//! owns the ordered alias list for each field so that resolution happens in
//! one place.

use crate::domain::ids::PlantId;
use serde::{Deserialize, Serialize};

/// Sentinel stop reason used when the sheet leaves the column empty
pub const STOP_NOT_APPLICABLE: &str = "N/A";

/// Logical fields of a plant record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantField {
    CommonName,
    ScientificName,
    Quantity,
    BuyNewWontSurvive,
    BuyNewReadilyAvailable,
    MoveItStaffCanDo,
    MoveItRequiresConsult,
    Notes,
    Display,
    Stop,
    Location,
    ImageUrl,
}

impl PlantField {
    /// Every field, in sheet column order
    pub const ALL: [PlantField; 12] = [
        PlantField::CommonName,
        PlantField::ScientificName,
        PlantField::Quantity,
        PlantField::BuyNewWontSurvive,
        PlantField::BuyNewReadilyAvailable,
        PlantField::MoveItStaffCanDo,
        PlantField::MoveItRequiresConsult,
        PlantField::Notes,
        PlantField::Display,
        PlantField::Stop,
        PlantField::Location,
        PlantField::ImageUrl,
    ];

    /// The five yes/no columns marked with an `x` in the sheet
    pub const FLAGS: [PlantField; 5] = [
        PlantField::BuyNewWontSurvive,
        PlantField::BuyNewReadilyAvailable,
        PlantField::MoveItStaffCanDo,
        PlantField::MoveItRequiresConsult,
        PlantField::Display,
    ];

    /// Canonical spreadsheet header for this field
    pub fn header_name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Store column / snake_case name for this field
    pub fn column_name(self) -> &'static str {
        self.aliases()[1]
    }

    /// Accepted keys, in resolution order
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            PlantField::CommonName => &["Common Name", "common_name"],
            PlantField::ScientificName => &["Scientific Name", "scientific_name"],
            PlantField::Quantity => &["Qty", "qty", "quantity"],
            PlantField::BuyNewWontSurvive => &[
                "Buy New - Won't Survive/Not Worth Moving",
                "buy_new_wont_survive",
            ],
            PlantField::BuyNewReadilyAvailable => {
                &["Buy New - Readily Available", "buy_new_readily_available"]
            }
            PlantField::MoveItStaffCanDo => {
                &["Move It - Can be done by Domes staff", "move_it_staff_can_do"]
            }
            PlantField::MoveItRequiresConsult => &[
                "Move It - Requires consult - might not survive move",
                "move_it_requires_consult",
            ],
            PlantField::Notes => &["Notes", "notes"],
            PlantField::Display => &["Display", "display"],
            PlantField::Stop => &["Stop", "stop", "stop_reason"],
            PlantField::Location => &["Dome", "dome", "location"],
            PlantField::ImageUrl => &["Image URL", "image_url"],
        }
    }

    /// Fixed sheet column for this field, if it has one
    pub fn column_index(self) -> Option<usize> {
        match self {
            PlantField::CommonName => Some(0),
            PlantField::ScientificName => Some(1),
            PlantField::Quantity => Some(2),
            PlantField::BuyNewWontSurvive => Some(3),
            PlantField::BuyNewReadilyAvailable => Some(4),
            PlantField::MoveItStaffCanDo => Some(5),
            PlantField::MoveItRequiresConsult => Some(6),
            PlantField::Notes => Some(7),
            PlantField::Display => Some(8),
            PlantField::Stop => Some(9),
            PlantField::Location | PlantField::ImageUrl => None,
        }
    }

    /// True for the `x`-marked columns
    pub fn is_flag(self) -> bool {
        Self::FLAGS.contains(&self)
    }

    /// Resolves a field from any of its aliases
    ///
    /// Exact matches win; otherwise a case-insensitive match is accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.aliases().contains(&name))
            .or_else(|| {
                Self::ALL.iter().copied().find(|f| {
                    f.aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(name))
                })
            })
    }
}

/// Composite key matching an incoming record to a stored row
///
/// `(common name or "", scientific name, location)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersistedKey {
    pub common_name: String,
    pub scientific_name: String,
    pub location: String,
}

impl PersistedKey {
    pub fn new(
        common_name: Option<&str>,
        scientific_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            common_name: common_name.unwrap_or_default().to_string(),
            scientific_name: scientific_name.into(),
            location: location.into(),
        }
    }
}

/// The normalized unit of inventory data
///
/// Serializes with the store's column names; `source_row` only exists for
/// records that came out of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub common_name: Option<String>,

    pub scientific_name: String,

    #[serde(rename = "qty")]
    pub quantity: Option<String>,

    #[serde(default)]
    pub buy_new_wont_survive: bool,

    #[serde(default)]
    pub buy_new_readily_available: bool,

    #[serde(default)]
    pub move_it_staff_can_do: bool,

    #[serde(default)]
    pub move_it_requires_consult: bool,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub display: bool,

    #[serde(default = "default_stop")]
    pub stop: String,

    #[serde(rename = "dome")]
    pub location: String,

    #[serde(skip)]
    pub source_row: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_stop() -> String {
    STOP_NOT_APPLICABLE.to_string()
}

impl PlantRecord {
    /// Creates a record with every optional field at its default
    pub fn new(scientific_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            common_name: None,
            scientific_name: scientific_name.into(),
            quantity: None,
            buy_new_wont_survive: false,
            buy_new_readily_available: false,
            move_it_staff_can_do: false,
            move_it_requires_consult: false,
            notes: String::new(),
            display: false,
            stop: default_stop(),
            location: location.into(),
            source_row: 0,
            image_url: None,
        }
    }

    /// Sets the common name
    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Sets the source row
    pub fn with_source_row(mut self, source_row: usize) -> Self {
        self.source_row = source_row;
        self
    }

    /// Composite key used for reconciliation
    pub fn key(&self) -> PersistedKey {
        PersistedKey::new(
            self.common_name.as_deref(),
            self.scientific_name.clone(),
            self.location.clone(),
        )
    }

    /// Text value of a field; `None` for flags and absent values
    pub fn text(&self, field: PlantField) -> Option<&str> {
        let value = match field {
            PlantField::CommonName => self.common_name.as_deref(),
            PlantField::ScientificName => Some(self.scientific_name.as_str()),
            PlantField::Quantity => self.quantity.as_deref(),
            PlantField::Notes => Some(self.notes.as_str()),
            PlantField::Stop => Some(self.stop.as_str()),
            PlantField::Location => Some(self.location.as_str()),
            PlantField::ImageUrl => self.image_url.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Value of a flag field; `None` for text fields
    pub fn flag(&self, field: PlantField) -> Option<bool> {
        match field {
            PlantField::BuyNewWontSurvive => Some(self.buy_new_wont_survive),
            PlantField::BuyNewReadilyAvailable => Some(self.buy_new_readily_available),
            PlantField::MoveItStaffCanDo => Some(self.move_it_staff_can_do),
            PlantField::MoveItRequiresConsult => Some(self.move_it_requires_consult),
            PlantField::Display => Some(self.display),
            _ => None,
        }
    }

    /// Sets a flag field; text fields are ignored
    pub fn set_flag(&mut self, field: PlantField, value: bool) {
        match field {
            PlantField::BuyNewWontSurvive => self.buy_new_wont_survive = value,
            PlantField::BuyNewReadilyAvailable => self.buy_new_readily_available = value,
            PlantField::MoveItStaffCanDo => self.move_it_staff_can_do = value,
            PlantField::MoveItRequiresConsult => self.move_it_requires_consult = value,
            PlantField::Display => self.display = value,
            _ => {}
        }
    }
}

/// A record as it exists in the store, with its store-owned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlant {
    pub id: PlantId,

    #[serde(flatten)]
    pub record: PlantRecord,
}

impl PersistedPlant {
    pub fn key(&self) -> PersistedKey {
        self.record.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_aliases_resolve() {
        assert_eq!(
            PlantField::from_name("Common Name"),
            Some(PlantField::CommonName)
        );
        assert_eq!(
            PlantField::from_name("scientific_name"),
            Some(PlantField::ScientificName)
        );
        assert_eq!(PlantField::from_name("DOME"), Some(PlantField::Location));
        assert_eq!(PlantField::from_name("quantity"), Some(PlantField::Quantity));
        assert_eq!(PlantField::from_name("Color"), None);
    }

    #[test]
    fn test_header_and_column_names() {
        assert_eq!(PlantField::Quantity.header_name(), "Qty");
        assert_eq!(PlantField::Quantity.column_name(), "qty");
        assert_eq!(PlantField::Location.header_name(), "Dome");
        assert_eq!(PlantField::Location.column_name(), "dome");
        assert_eq!(PlantField::Stop.column_index(), Some(9));
        assert!(PlantField::Display.is_flag());
        assert!(!PlantField::Notes.is_flag());
    }

    #[test]
    fn test_key_uses_empty_common_name() {
        let record = PlantRecord::new("Nephrolepis exaltata", "Tropical Dome");
        let key = record.key();
        assert_eq!(key.common_name, "");
        assert_eq!(key.scientific_name, "Nephrolepis exaltata");
        assert_eq!(key.location, "Tropical Dome");
    }

    #[test]
    fn test_text_skips_empty_values() {
        let record = PlantRecord::new("Aloe vera", "Desert Dome").with_common_name("Aloe");
        assert_eq!(record.text(PlantField::CommonName), Some("Aloe"));
        assert_eq!(record.text(PlantField::Notes), None);
        assert_eq!(record.text(PlantField::Display), None);
        assert_eq!(record.flag(PlantField::Display), Some(false));
    }

    #[test]
    fn test_record_serializes_with_store_columns() {
        let record = PlantRecord::new("Aloe vera", "Desert Dome")
            .with_quantity("6+")
            .with_source_row(12);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["qty"], "6+");
        assert_eq!(json["dome"], "Desert Dome");
        assert_eq!(json["stop"], "N/A");
        assert!(json.get("source_row").is_none());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_persisted_plant_round_trips_flattened() {
        let json = serde_json::json!({
            "id": "7",
            "common_name": null,
            "scientific_name": "Aloe vera",
            "qty": null,
            "dome": "Desert Dome",
            "image_url": "https://img.example/aloe.jpg"
        });
        let plant: PersistedPlant = serde_json::from_value(json).unwrap();
        assert_eq!(plant.id.as_str(), "7");
        assert_eq!(plant.record.stop, "N/A");
        assert_eq!(
            plant.record.image_url.as_deref(),
            Some("https://img.example/aloe.jpg")
        );
    }
}
