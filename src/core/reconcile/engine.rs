//! Reconciliation engine
//!
//! Normalize, fetch the stored key to id mapping once, partition, write in
//! chunks, summarize. Only the bulk read is fatal; write failures are
//! recorded per chunk and the run carries on.

use crate::adapters::database::traits::{PlantFilter, PlantStore};
use crate::config::ReconcileConfig;
use crate::core::reconcile::input::{normalize_input, ReconcileInput};
use crate::core::reconcile::plan::ReconciliationPlan;
use crate::core::reconcile::summary::{BatchOutcome, ReconcileError, ReconciliationResult};
use crate::domain::{PlantId, PlantRecord};
use crate::log_batch_processing;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// Default records per write call
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Writes incoming records into a [`PlantStore`]
pub struct ReconciliationEngine {
    store: Arc<dyn PlantStore>,
    chunk_size: usize,
    max_concurrent_batches: usize,
    dry_run: bool,
}

impl ReconciliationEngine {
    /// Creates an engine with default chunking, one chunk in flight at a time
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self {
            store,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_batches: 1,
            dry_run: false,
        }
    }

    pub fn from_config(store: Arc<dyn PlantStore>, config: &ReconcileConfig) -> Self {
        Self::new(store)
            .with_chunk_size(config.chunk_size)
            .with_max_concurrent_batches(config.max_concurrent_batches)
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_max_concurrent_batches(mut self, max: usize) -> Self {
        self.max_concurrent_batches = max.max(1);
        self
    }

    /// Compute and report the plan without writing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store_name(&self) -> &str {
        self.store.store_name()
    }

    /// Reconciles `inputs` against the store
    ///
    /// Never fails as a whole: problems are reported through the result's
    /// error list.
    ///
    /// When no input survives validation the store is not read at all and the
    /// result carries only the validation errors. Otherwise the store is read
    /// exactly once.
    pub async fn reconcile<I>(&self, inputs: I) -> ReconciliationResult
    where
        I: IntoIterator,
        I::Item: Into<ReconcileInput>,
    {
        let mut result = ReconciliationResult::new();
        result.dry_run = self.dry_run;

        let mut records = Vec::new();
        for input in inputs {
            match normalize_input(input.into()) {
                Ok(record) => records.push(record),
                Err(message) => {
                    tracing::debug!(error = %message, "Skipping invalid record");
                    result.add_error(ReconcileError::validation(message));
                }
            }
        }

        if records.is_empty() {
            tracing::info!(
                rejected = result.error_count(),
                "No valid records to reconcile"
            );
            return result;
        }

        let existing = match self.store.fetch_plants(&PlantFilter::all()).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!(
                    store = self.store.store_name(),
                    error = %e,
                    "Failed to fetch existing plants"
                );
                let mut failed =
                    ReconciliationResult::read_failed(format!("Error fetching existing plants: {e}"));
                failed.dry_run = self.dry_run;
                return failed;
            }
        };

        let plan = ReconciliationPlan::build(records, &existing);
        tracing::info!(
            store = self.store.store_name(),
            existing = existing.len(),
            to_insert = plan.to_insert.len(),
            to_update = plan.to_update.len(),
            chunk_size = self.chunk_size,
            "Reconciliation plan computed"
        );

        if self.dry_run {
            result.saved = plan.to_insert.len();
            result.updated = plan.to_update.len();
            result.log_summary();
            return result;
        }

        for outcome in self.write_inserts(&plan.to_insert).await {
            result.merge_inserts(outcome);
        }
        for outcome in self.write_updates(&plan.to_update).await {
            result.merge_updates(outcome);
        }

        result.log_summary();
        result
    }

    /// Insert chunks, in chunk order
    async fn write_inserts(&self, records: &[PlantRecord]) -> Vec<BatchOutcome> {
        let total = records.len().div_ceil(self.chunk_size);
        stream::iter(records.chunks(self.chunk_size).enumerate())
            .map(|(index, chunk)| self.insert_chunk(index, total, chunk))
            .buffered(self.max_concurrent_batches)
            .collect()
            .await
    }

    /// Update chunks, in chunk order
    async fn write_updates(&self, records: &[(PlantId, PlantRecord)]) -> Vec<BatchOutcome> {
        let total = records.len().div_ceil(self.chunk_size);
        stream::iter(records.chunks(self.chunk_size).enumerate())
            .map(|(index, chunk)| self.update_chunk(index, total, chunk))
            .buffered(self.max_concurrent_batches)
            .collect()
            .await
    }

    async fn insert_chunk(&self, index: usize, total: usize, chunk: &[PlantRecord]) -> BatchOutcome {
        log_batch_processing!("insert", index + 1, total);

        let error = match self.store.insert_many(chunk).await {
            Ok(_) => return BatchOutcome::written(chunk.len()),
            Err(e) => e,
        };

        tracing::warn!(
            batch = index + 1,
            records = chunk.len(),
            error = %error,
            "Batch insert failed, retrying records individually"
        );
        let mut outcome = BatchOutcome::default();
        outcome.add_failure(ReconcileError::store_write(format!(
            "Error inserting batch {}: {error}",
            index + 1
        )));

        for record in chunk {
            match self.store.insert_many(std::slice::from_ref(record)).await {
                Ok(_) => outcome.add_success(),
                Err(e) => {
                    tracing::debug!(
                        scientific_name = %record.scientific_name,
                        location = %record.location,
                        error = %e,
                        "Individual insert failed"
                    );
                    outcome.add_failure(ReconcileError::store_write(format!(
                        "Error saving plant {}: {e}",
                        record.scientific_name
                    )));
                }
            }
        }
        outcome
    }

    async fn update_chunk(
        &self,
        index: usize,
        total: usize,
        chunk: &[(PlantId, PlantRecord)],
    ) -> BatchOutcome {
        log_batch_processing!("update", index + 1, total);

        let rows = last_write_per_id(chunk);
        if rows.len() < chunk.len() {
            tracing::debug!(
                batch = index + 1,
                records = chunk.len(),
                rows = rows.len(),
                "Collapsed repeated ids in update batch"
            );
        }

        match self.store.upsert_many(&rows).await {
            Ok(_) => BatchOutcome::written(chunk.len()),
            Err(e) => {
                tracing::warn!(
                    batch = index + 1,
                    records = chunk.len(),
                    error = %e,
                    "Batch update failed"
                );
                let mut outcome = BatchOutcome::default();
                outcome.add_failure(ReconcileError::store_write(format!(
                    "Error updating batch {}: {e}",
                    index + 1
                )));
                outcome
            }
        }
    }
}

/// Keeps the last record for each id
///
/// Stores reject an upsert that touches one row twice, so records that
/// matched the same stored plant are written once, with the later record
/// winning.
fn last_write_per_id(chunk: &[(PlantId, PlantRecord)]) -> Vec<(PlantId, PlantRecord)> {
    let mut seen = HashSet::new();
    let mut rows: Vec<(PlantId, PlantRecord)> = chunk
        .iter()
        .rev()
        .filter(|(id, _)| seen.insert(id.clone()))
        .cloned()
        .collect();
    rows.reverse();
    rows
}
