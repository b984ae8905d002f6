//! Reconciliation tests against the in-memory store

use domekeeper::adapters::database::PlantStore;
use domekeeper::adapters::memory::MemoryStore;
use domekeeper::core::reconcile::{
    RawRecord, ReconcileErrorKind, ReconcileInput, ReconciliationEngine,
};
use domekeeper::domain::{Cell, PlantRecord};
use std::sync::Arc;

fn plant(common: &str, scientific: &str, location: &str) -> PlantRecord {
    PlantRecord::new(scientific, location).with_common_name(common)
}

fn numbered(count: usize) -> Vec<PlantRecord> {
    (0..count)
        .map(|i| plant(&format!("Plant {i}"), &format!("Species {i}"), "Tropical Dome"))
        .collect()
}

fn raw(pairs: &[(&str, Cell)]) -> RawRecord {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let engine = ReconciliationEngine::new(store.clone());
    let records = numbered(7);

    let first = engine.reconcile(records.clone()).await;
    assert_eq!((first.saved, first.updated), (7, 0));
    assert!(first.success());

    let second = engine.reconcile(records).await;
    assert_eq!((second.saved, second.updated), (0, 7));
    assert_eq!(store.len(), 7);
}

#[tokio::test]
async fn test_partition_by_common_scientific_and_dome() {
    let store = Arc::new(MemoryStore::with_plants(vec![
        plant("Aloe", "Aloe vera", "Desert Dome"),
        plant("Boston Fern", "Nephrolepis exaltata", "Tropical Dome"),
        plant("Ocotillo", "Fouquieria splendens", "Desert Dome"),
    ]));
    let engine = ReconciliationEngine::new(store.clone());

    let result = engine
        .reconcile(vec![
            plant("Aloe", "Aloe vera", "Desert Dome").with_quantity("9"),
            plant("Boston Fern", "Nephrolepis exaltata", "Tropical Dome"),
            plant("Ocotillo", "Fouquieria splendens", "Desert Dome"),
            // Same species, other dome: a new plant
            plant("Aloe", "Aloe vera", "Tropical Dome"),
            // Same species, other common name: a new plant
            plant("Medicinal Aloe", "Aloe vera", "Desert Dome"),
        ])
        .await;

    assert_eq!(result.saved, 2);
    assert_eq!(result.updated, 3);
    assert_eq!(result.error_count(), 0);
    assert_eq!(store.len(), 5);

    let updated = store
        .plants()
        .into_iter()
        .find(|p| p.record.common_name.as_deref() == Some("Aloe") && p.record.location == "Desert Dome")
        .unwrap();
    assert_eq!(updated.record.quantity.as_deref(), Some("9"));
}

#[tokio::test]
async fn test_default_chunking() {
    let store = Arc::new(MemoryStore::new());
    let engine = ReconciliationEngine::new(store.clone());

    let result = engine.reconcile(numbered(150)).await;
    assert_eq!(result.saved, 150);
    assert_eq!(store.insert_calls(), vec![100, 50]);

    let result = engine.reconcile(numbered(150)).await;
    assert_eq!(result.updated, 150);
    assert_eq!(store.upsert_calls(), vec![100, 50]);
}

#[tokio::test]
async fn test_failed_insert_chunk_falls_back_to_single_records() {
    let store = Arc::new(MemoryStore::new());
    store.fail_bulk_inserts(true);
    store.reject_scientific_name("Species 1");
    let engine = ReconciliationEngine::new(store.clone()).with_chunk_size(3);

    let result = engine.reconcile(numbered(3)).await;

    assert_eq!(result.saved, 2);
    assert_eq!(store.insert_calls(), vec![3, 1, 1, 1]);

    let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Error inserting batch 1:"));
    assert!(messages[1].starts_with("Error saving plant Species 1:"));
    assert!(result
        .errors
        .iter()
        .all(|e| e.kind == ReconcileErrorKind::StoreWrite));
}

#[tokio::test]
async fn test_failed_update_chunk_is_not_retried() {
    let store = Arc::new(MemoryStore::with_plants(numbered(5)));
    store.fail_upserts(true);
    let engine = ReconciliationEngine::new(store.clone()).with_chunk_size(2);

    let mut records = numbered(5);
    records.push(plant("Newcomer", "Species new", "Tropical Dome"));
    let result = engine.reconcile(records).await;

    assert_eq!(result.saved, 1);
    assert_eq!(result.updated, 0);
    assert_eq!(store.upsert_calls(), vec![2, 2, 1]);
    assert_eq!(result.error_count(), 3);
    assert!(result.errors[0].message.starts_with("Error updating batch 1:"));
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    store.fail_fetch(true);
    let engine = ReconciliationEngine::new(store.clone());

    let result = engine.reconcile(numbered(4)).await;

    assert_eq!((result.saved, result.updated), (0, 0));
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors[0].kind, ReconcileErrorKind::StoreRead);
    assert!(result.errors[0]
        .message
        .starts_with("Error fetching existing plants:"));
    assert!(store.insert_calls().is_empty());
}

#[tokio::test]
async fn test_invalid_records_are_reported_and_skipped() {
    let store = Arc::new(MemoryStore::new());
    let engine = ReconciliationEngine::new(store.clone());

    let inputs: Vec<ReconcileInput> = vec![
        plant("Aloe", "Aloe vera", "Desert Dome").into(),
        plant("Mystery", "", "Desert Dome").into(),
        PlantRecord::new("nan", "Desert Dome").into(),
        plant("Agave", "Agave americana", "").into(),
    ];
    let result = engine.reconcile(inputs).await;

    assert_eq!(result.saved, 1);
    let messages: Vec<&str> = result
        .errors_of(ReconcileErrorKind::Validation)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Plant missing scientific_name or dome: Mystery",
            "Plant missing scientific_name or dome: Unknown",
            "Plant missing scientific_name or dome: Agave americana",
        ]
    );
}

#[tokio::test]
async fn test_raw_dictionaries_are_normalized() {
    let store = Arc::new(MemoryStore::new());
    let engine = ReconciliationEngine::new(store.clone());

    let inputs: Vec<ReconcileInput> = vec![
        raw(&[
            ("Common Name", Cell::text("Boston Fern")),
            ("scientific_name", Cell::text(" Nephrolepis exaltata ")),
            ("Qty", Cell::Number(4.0)),
            ("Display", Cell::text("X")),
            ("Buy New - Readily Available", Cell::Bool(true)),
            ("Notes", Cell::text("nan")),
            ("Stop", Cell::Number(f64::NAN)),
            ("dome", Cell::text("Tropical Dome")),
        ])
        .into(),
        raw(&[("common_name", Cell::text("Nameless"))]).into(),
    ];
    let result = engine.reconcile(inputs).await;

    assert_eq!(result.saved, 1);
    assert_eq!(result.errors_of(ReconcileErrorKind::Validation).count(), 1);

    let stored = store.plants().remove(0).record;
    assert_eq!(stored.scientific_name, "Nephrolepis exaltata");
    assert_eq!(stored.quantity.as_deref(), Some("4"));
    assert!(stored.display);
    assert!(stored.buy_new_readily_available);
    assert_eq!(stored.notes, "");
    assert_eq!(stored.stop, "N/A");
    assert_eq!(stored.location, "Tropical Dome");
}

#[tokio::test]
async fn test_dry_run_plans_without_writing() {
    let store = Arc::new(MemoryStore::with_plants(numbered(2)));
    let engine = ReconciliationEngine::new(store.clone()).with_dry_run(true);

    let result = engine.reconcile(numbered(5)).await;

    assert!(result.dry_run);
    assert_eq!((result.saved, result.updated), (3, 2));
    assert_eq!(store.len(), 2);
    assert!(store.insert_calls().is_empty());
    assert!(store.upsert_calls().is_empty());
    assert_eq!(store.fetch_calls(), 1);
}

#[tokio::test]
async fn test_result_serializes_for_reporting() {
    let store = Arc::new(MemoryStore::new());
    store.fail_fetch(true);
    let result = ReconciliationEngine::new(store.clone())
        .reconcile(numbered(1))
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["saved"], 0);
    assert_eq!(json["errors"][0]["kind"], "store_read");
    assert_eq!(store.store_name(), "memory");
}
