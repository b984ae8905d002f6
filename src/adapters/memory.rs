//! In-memory plant store
//!
//! Used for dry experimentation (`store_target = "memory"`) and as the store
//! behind reconciliation tests. Ids are sequential integers rendered as text.
//! Failures can be injected per operation.

use crate::adapters::database::traits::{PlantFilter, PlantStore};
use crate::domain::{DomekeeperError, PersistedPlant, PlantId, PlantRecord, Result, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    rows: BTreeMap<u64, PersistedPlant>,
    insert_calls: Vec<usize>,
    upsert_calls: Vec<usize>,
    fetch_calls: usize,
}

/// Process-local [`PlantStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail_fetch: AtomicBool,
    fail_bulk_inserts: AtomicBool,
    fail_upserts: AtomicBool,
    rejected_names: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `records`
    pub fn with_plants(records: impl IntoIterator<Item = PlantRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            for record in records {
                state.insert(record);
            }
        }
        store
    }

    /// Makes every bulk read fail
    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Makes insert calls carrying more than one record fail
    pub fn fail_bulk_inserts(&self, fail: bool) {
        self.fail_bulk_inserts.store(fail, Ordering::SeqCst);
    }

    /// Makes every upsert call fail
    pub fn fail_upserts(&self, fail: bool) {
        self.fail_upserts.store(fail, Ordering::SeqCst);
    }

    /// Makes any write call containing this scientific name fail
    pub fn reject_scientific_name(&self, name: impl Into<String>) {
        if let Ok(mut names) = self.rejected_names.lock() {
            names.insert(name.into());
        }
    }

    /// Every stored plant, in id order
    pub fn plants(&self) -> Vec<PersistedPlant> {
        self.state
            .lock()
            .map(|state| state.rows.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of stored plants
    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record count of every insert call, in call order
    pub fn insert_calls(&self) -> Vec<usize> {
        self.state
            .lock()
            .map(|state| state.insert_calls.clone())
            .unwrap_or_default()
    }

    /// Record count of every upsert call, in call order
    pub fn upsert_calls(&self) -> Vec<usize> {
        self.state
            .lock()
            .map(|state| state.upsert_calls.clone())
            .unwrap_or_default()
    }

    /// Number of bulk reads served or refused
    pub fn fetch_calls(&self) -> usize {
        self.state.lock().map(|state| state.fetch_calls).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| DomekeeperError::Other("Memory store lock poisoned".to_string()))
    }

    fn rejected_in<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> Option<String> {
        let rejected = self.rejected_names.lock().ok()?;
        names.find(|name| rejected.contains(*name)).map(str::to_string)
    }
}

impl State {
    fn insert(&mut self, record: PlantRecord) -> PlantId {
        self.next_id += 1;
        let id = PlantId::from(self.next_id);
        self.rows.insert(
            self.next_id,
            PersistedPlant {
                id: id.clone(),
                record,
            },
        );
        id
    }
}

#[async_trait]
impl PlantStore for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_plants(&self, filter: &PlantFilter) -> Result<Vec<PersistedPlant>> {
        let mut state = self.lock()?;
        state.fetch_calls += 1;

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed("injected fetch failure".to_string()).into());
        }

        Ok(state
            .rows
            .values()
            .filter(|plant| filter.matches(plant))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, records: &[PlantRecord]) -> Result<usize> {
        let mut state = self.lock()?;
        state.insert_calls.push(records.len());

        if records.len() > 1 && self.fail_bulk_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::InsertFailed("injected bulk insert failure".to_string()).into());
        }
        if let Some(name) = self.rejected_in(records.iter().map(|r| r.scientific_name.as_str())) {
            return Err(StoreError::InsertFailed(format!("rejected record '{name}'")).into());
        }

        for record in records {
            state.insert(record.clone());
        }
        Ok(records.len())
    }

    async fn upsert_many(&self, records: &[(PlantId, PlantRecord)]) -> Result<usize> {
        let mut state = self.lock()?;
        state.upsert_calls.push(records.len());

        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(StoreError::UpsertFailed("injected upsert failure".to_string()).into());
        }
        if let Some(name) = self.rejected_in(records.iter().map(|(_, r)| r.scientific_name.as_str())) {
            return Err(StoreError::UpsertFailed(format!("rejected record '{name}'")).into());
        }

        // Same rule as ON CONFLICT DO UPDATE: one row per statement at most once
        let mut ids = HashSet::new();
        if let Some((id, _)) = records.iter().find(|(id, _)| !ids.insert(id.clone())) {
            return Err(StoreError::UpsertFailed(format!(
                "upsert cannot affect row '{id}' a second time"
            ))
            .into());
        }

        for (id, record) in records {
            let key: u64 = id
                .as_str()
                .parse()
                .map_err(|_| StoreError::UpsertFailed(format!("unknown id '{id}'")))?;
            let image_url = state
                .rows
                .get(&key)
                .and_then(|existing| existing.record.image_url.clone());

            let mut record = record.clone();
            if record.image_url.is_none() {
                record.image_url = image_url;
            }
            state.rows.insert(
                key,
                PersistedPlant {
                    id: id.clone(),
                    record,
                },
            );
        }
        Ok(records.len())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let written = store
            .insert_many(&[
                PlantRecord::new("Aloe vera", "Desert Dome"),
                PlantRecord::new("Agave americana", "Desert Dome"),
            ])
            .await
            .unwrap();

        assert_eq!(written, 2);
        let ids: Vec<String> = store.plants().into_iter().map(|p| p.id.into_inner()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(store.insert_calls(), vec![2]);
    }

    #[tokio::test]
    async fn test_upsert_keeps_existing_image_url() {
        let mut seeded = PlantRecord::new("Aloe vera", "Desert Dome");
        seeded.image_url = Some("https://img.example/aloe.jpg".to_string());
        let store = MemoryStore::with_plants([seeded]);

        let id = PlantId::new("1").unwrap();
        let update = PlantRecord::new("Aloe vera", "Desert Dome").with_quantity("3");
        store.upsert_many(&[(id, update)]).await.unwrap();

        let plant = &store.plants()[0];
        assert_eq!(plant.record.quantity.as_deref(), Some("3"));
        assert_eq!(
            plant.record.image_url.as_deref(),
            Some("https://img.example/aloe.jpg")
        );
    }

    #[tokio::test]
    async fn test_upsert_rejects_repeated_id() {
        let store = MemoryStore::with_plants([PlantRecord::new("Aloe vera", "Desert Dome")]);
        let id = PlantId::new("1").unwrap();
        let record = PlantRecord::new("Aloe vera", "Desert Dome");

        let err = store
            .upsert_many(&[(id.clone(), record.clone()), (id, record)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomekeeperError::Store(StoreError::UpsertFailed(_))));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_fetch(true);
        assert!(store.fetch_plants(&PlantFilter::all()).await.is_err());
        assert_eq!(store.fetch_calls(), 1);

        store.fail_bulk_inserts(true);
        let pair = [
            PlantRecord::new("Aloe vera", "Desert Dome"),
            PlantRecord::new("Agave americana", "Desert Dome"),
        ];
        assert!(store.insert_many(&pair).await.is_err());
        assert!(store.insert_many(&pair[..1]).await.is_ok());

        store.reject_scientific_name("Agave americana");
        assert!(store.insert_many(&pair[1..]).await.is_err());
        assert_eq!(store.len(), 1);
    }
}
