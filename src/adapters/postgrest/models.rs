//! JSON rows exchanged with PostgREST

use crate::domain::{PersistedPlant, PlantId, PlantRecord, StoreError, STOP_NOT_APPLICABLE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row as PostgREST returns it
///
/// Every column is optional so rows written by other tools still decode.
#[derive(Debug, Clone, Deserialize)]
pub struct PlantRow {
    pub id: Value,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub qty: Option<Value>,
    pub buy_new_wont_survive: Option<bool>,
    pub buy_new_readily_available: Option<bool>,
    pub move_it_staff_can_do: Option<bool>,
    pub move_it_requires_consult: Option<bool>,
    pub notes: Option<String>,
    pub display: Option<bool>,
    pub stop: Option<String>,
    pub dome: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<PlantRow> for PersistedPlant {
    type Error = StoreError;

    fn try_from(row: PlantRow) -> Result<Self, Self::Error> {
        let id = match row.id {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(StoreError::InvalidResponse(format!(
                    "unexpected plant id: {other}"
                )))
            }
        };
        let id = PlantId::new(id).map_err(StoreError::InvalidResponse)?;

        let mut record = PlantRecord::new(
            row.scientific_name.unwrap_or_default(),
            row.dome.unwrap_or_default(),
        );
        record.common_name = row.common_name;
        record.quantity = row.qty.and_then(|qty| match qty {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        record.buy_new_wont_survive = row.buy_new_wont_survive.unwrap_or(false);
        record.buy_new_readily_available = row.buy_new_readily_available.unwrap_or(false);
        record.move_it_staff_can_do = row.move_it_staff_can_do.unwrap_or(false);
        record.move_it_requires_consult = row.move_it_requires_consult.unwrap_or(false);
        record.notes = row.notes.unwrap_or_default();
        record.display = row.display.unwrap_or(false);
        record.stop = row.stop.unwrap_or_else(|| STOP_NOT_APPLICABLE.to_string());
        record.image_url = row.image_url;

        Ok(PersistedPlant { id, record })
    }
}

/// Body of one row in a write request
///
/// Bulk requests need identical keys on every object, so the image URL is
/// never sent; it is managed by the image upload flow.
#[derive(Debug, Clone, Serialize)]
pub struct PlantPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub common_name: Option<&'a str>,
    pub scientific_name: &'a str,
    pub qty: Option<&'a str>,
    pub buy_new_wont_survive: bool,
    pub buy_new_readily_available: bool,
    pub move_it_staff_can_do: bool,
    pub move_it_requires_consult: bool,
    pub notes: &'a str,
    pub display: bool,
    pub stop: &'a str,
    pub dome: &'a str,
}

impl<'a> PlantPayload<'a> {
    pub fn new(record: &'a PlantRecord) -> Self {
        Self {
            id: None,
            common_name: record.common_name.as_deref(),
            scientific_name: &record.scientific_name,
            qty: record.quantity.as_deref(),
            buy_new_wont_survive: record.buy_new_wont_survive,
            buy_new_readily_available: record.buy_new_readily_available,
            move_it_staff_can_do: record.move_it_staff_can_do,
            move_it_requires_consult: record.move_it_requires_consult,
            notes: &record.notes,
            display: record.display,
            stop: &record.stop,
            dome: &record.location,
        }
    }

    pub fn with_id(record: &'a PlantRecord, id: &'a PlantId) -> Self {
        Self {
            id: Some(id.as_str()),
            ..Self::new(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_with_nulls_decodes_to_defaults() {
        let row: PlantRow = serde_json::from_value(json!({
            "id": "5b0f7c1e-8d1a-4c53-9a43-2f6f0a6b8f11",
            "common_name": null,
            "scientific_name": "Aloe vera",
            "qty": 6,
            "notes": null,
            "stop": null,
            "dome": "Desert Dome",
            "created_at": "2024-05-01T00:00:00Z"
        }))
        .unwrap();

        let plant = PersistedPlant::try_from(row).unwrap();
        assert_eq!(plant.id.as_str(), "5b0f7c1e-8d1a-4c53-9a43-2f6f0a6b8f11");
        assert_eq!(plant.record.quantity.as_deref(), Some("6"));
        assert_eq!(plant.record.notes, "");
        assert_eq!(plant.record.stop, "N/A");
        assert!(!plant.record.display);
    }

    #[test]
    fn test_numeric_ids_are_accepted() {
        let row: PlantRow = serde_json::from_value(json!({"id": 42, "scientific_name": "Aloe vera"})).unwrap();
        assert_eq!(PersistedPlant::try_from(row).unwrap().id.as_str(), "42");

        let row: PlantRow = serde_json::from_value(json!({"id": null})).unwrap();
        assert!(PersistedPlant::try_from(row).is_err());
    }

    #[test]
    fn test_payload_omits_image_url_and_optional_id() {
        let mut record = PlantRecord::new("Aloe vera", "Desert Dome");
        record.image_url = Some("https://img.example/aloe.jpg".to_string());

        let insert = serde_json::to_value(PlantPayload::new(&record)).unwrap();
        assert!(insert.get("id").is_none());
        assert!(insert.get("image_url").is_none());
        assert_eq!(insert["dome"], "Desert Dome");

        let id = PlantId::new("7").unwrap();
        let upsert = serde_json::to_value(PlantPayload::with_id(&record, &id)).unwrap();
        assert_eq!(upsert["id"], "7");
    }
}
