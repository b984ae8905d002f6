//! Partitioning incoming records against stored identity

use crate::domain::{PersistedKey, PersistedPlant, PlantId, PlantRecord};
use std::collections::HashMap;

/// Records split into creates and id-addressed overwrites
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan {
    pub to_insert: Vec<PlantRecord>,
    pub to_update: Vec<(PlantId, PlantRecord)>,
}

impl ReconciliationPlan {
    /// Partitions `records` by whether their key is already stored
    ///
    /// Incoming records are not deduplicated against each other: two records
    /// with the same new key are both inserted, and two with the same stored
    /// key both update that row.
    pub fn build(records: Vec<PlantRecord>, existing: &[PersistedPlant]) -> Self {
        let index = key_index(existing);
        let mut plan = Self::default();

        for record in records {
            match index.get(&record.key()) {
                Some(id) => plan.to_update.push(((*id).clone(), record)),
                None => plan.to_insert.push(record),
            }
        }

        plan
    }

    pub fn len(&self) -> usize {
        self.to_insert.len() + self.to_update.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key to id map; the first stored row wins when the store holds duplicates
fn key_index(existing: &[PersistedPlant]) -> HashMap<PersistedKey, &PlantId> {
    let mut index = HashMap::with_capacity(existing.len());
    for plant in existing {
        index.entry(plant.key()).or_insert(&plant.id);
    }
    index
}
