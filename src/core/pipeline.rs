//! Upload pipeline: parse a workbook, make it current, reconcile it
//!
//! A store failure never fails the upload. It only changes the message the
//! caller gets back.

use crate::core::catalog::InventoryService;
use crate::core::ingest::LoadSummary;
use crate::core::reconcile::{ReconcileErrorKind, ReconciliationEngine, ReconciliationResult};
use crate::domain::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Message prefix of every successful upload
pub const LOADED_MESSAGE: &str = "Excel file loaded successfully";

/// What the caller of an upload gets back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub success: bool,
    pub message: String,
    pub dome_counts: BTreeMap<String, usize>,
    pub total_plants: usize,
    pub domes: Vec<String>,

    /// Reconciliation details, absent when no store was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<ReconciliationResult>,
}

impl UploadSummary {
    fn loaded(summary: LoadSummary) -> Self {
        Self {
            success: true,
            message: LOADED_MESSAGE.to_string(),
            dome_counts: summary.dome_counts,
            total_plants: summary.total_plants,
            domes: summary.domes,
            reconciliation: None,
        }
    }

    /// True when the upload loaded and every write landed
    pub fn is_complete(&self) -> bool {
        self.success && self.reconciliation.as_ref().map_or(true, ReconciliationResult::success)
    }
}

/// Suffix appended to the load message after reconciliation
fn reconcile_message(result: &ReconciliationResult) -> String {
    if result.errors_of(ReconcileErrorKind::StoreRead).next().is_some() {
        return " | Warning: Database save failed".to_string();
    }
    if result.success() {
        format!(
            " | Saved {} new plants, updated {} existing plants",
            result.saved, result.updated
        )
    } else {
        format!(
            " | Database save completed with {} errors",
            result.error_count()
        )
    }
}

/// Loads uploads into an [`InventoryService`] and optionally reconciles them
pub struct UploadPipeline {
    inventory: Arc<InventoryService>,
    engine: Option<Arc<ReconciliationEngine>>,
}

impl UploadPipeline {
    /// A pipeline that only parses and holds uploads
    pub fn new(inventory: Arc<InventoryService>) -> Self {
        Self {
            inventory,
            engine: None,
        }
    }

    /// Also reconcile every upload through `engine`
    pub fn with_engine(mut self, engine: Arc<ReconciliationEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn inventory(&self) -> &Arc<InventoryService> {
        &self.inventory
    }

    /// Handles one upload
    ///
    /// # Errors
    ///
    /// Only parse errors are returned; the previously loaded table is kept.
    pub async fn upload(&self, bytes: &[u8]) -> Result<UploadSummary> {
        let (table, load_summary) = self.inventory.load(bytes).await?;
        let mut summary = UploadSummary::loaded(load_summary);

        let Some(engine) = &self.engine else {
            return Ok(summary);
        };

        let records = table.all_records();
        if records.is_empty() {
            summary.message.push_str(" | No plants to save to database");
            return Ok(summary);
        }

        tracing::info!(
            records = records.len(),
            store = engine.store_name(),
            "Starting database save"
        );
        let result = engine.reconcile(records).await;
        summary.message.push_str(&reconcile_message(&result));
        summary.reconciliation = Some(result);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconcile::ReconcileError;

    #[test]
    fn test_reconcile_message_variants() {
        let mut result = ReconciliationResult::new();
        result.saved = 4;
        result.updated = 2;
        assert_eq!(
            reconcile_message(&result),
            " | Saved 4 new plants, updated 2 existing plants"
        );

        result.add_error(ReconcileError::store_write("boom"));
        result.add_error(ReconcileError::validation("missing"));
        assert_eq!(
            reconcile_message(&result),
            " | Database save completed with 2 errors"
        );

        let failed = ReconciliationResult::read_failed("down");
        assert_eq!(reconcile_message(&failed), " | Warning: Database save failed");
    }
}
