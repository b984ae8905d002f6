//! Shared access to the current dome table

use crate::core::catalog::search::{resolve_fields, search};
use crate::core::catalog::table::{DomeTable, TableStatistics};
use crate::core::ingest::{load_workbook, LoadSummary};
use crate::domain::{DomekeeperError, PlantRecord, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the most recently loaded [`DomeTable`]
///
/// Construct one at startup and share it by `Arc`. A load parses the workbook
/// completely before swapping it in, so readers see either the old table or
/// the new one, never a mix.
#[derive(Debug, Default)]
pub struct InventoryService {
    table: RwLock<Option<Arc<DomeTable>>>,
    sheet_name: Option<String>,
}

impl InventoryService {
    /// Creates a service that reads the first worksheet of each upload
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service that reads a named worksheet
    pub fn with_sheet(sheet_name: impl Into<String>) -> Self {
        Self {
            table: RwLock::new(None),
            sheet_name: Some(sheet_name.into()),
        }
    }

    /// Parses workbook bytes and makes the result current
    ///
    /// On a parse error the previous table stays in place.
    pub async fn load(&self, bytes: &[u8]) -> Result<(Arc<DomeTable>, LoadSummary)> {
        let table = Arc::new(load_workbook(bytes, self.sheet_name.as_deref())?);
        let summary = LoadSummary::from_table(&table);
        self.replace(Arc::clone(&table)).await;
        Ok((table, summary))
    }

    /// Swaps in a table built elsewhere
    pub async fn replace(&self, table: Arc<DomeTable>) {
        *self.table.write().await = Some(table);
    }

    /// The current table, if one has been loaded
    pub async fn current(&self) -> Option<Arc<DomeTable>> {
        self.table.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.table.read().await.is_some()
    }

    /// The current table, or an error when nothing is loaded
    pub async fn require(&self) -> Result<Arc<DomeTable>> {
        self.current()
            .await
            .ok_or_else(|| DomekeeperError::Validation("No spreadsheet has been loaded".to_string()))
    }

    /// Searches the current table; field names may be header or column names
    pub async fn search(&self, location: &str, term: &str, fields: &[String]) -> Result<Vec<PlantRecord>> {
        let table = self.require().await?;
        let fields = resolve_fields(fields);
        Ok(search(&table, location, term, &fields)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn statistics(&self) -> Result<TableStatistics> {
        Ok(self.require().await?.statistics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(location: &str, scientific: &str) -> Arc<DomeTable> {
        let mut table = DomeTable::new(Vec::new());
        table.push_section(
            location,
            vec![PlantRecord::new(scientific, location).with_source_row(5)],
        );
        Arc::new(table)
    }

    #[tokio::test]
    async fn test_nothing_loaded() {
        let service = InventoryService::new();
        assert!(!service.is_loaded().await);
        assert!(service.current().await.is_none());
        assert!(matches!(
            service.statistics().await,
            Err(DomekeeperError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_swaps_whole_table() {
        let service = InventoryService::new();
        service.replace(table_with("Tropical Dome", "Nephrolepis")).await;
        let first = service.current().await.unwrap();

        service.replace(table_with("Desert Dome", "Aloe vera")).await;
        let second = service.current().await.unwrap();

        assert_eq!(first.locations(), vec!["Tropical Dome", "All"]);
        assert_eq!(second.locations(), vec!["Desert Dome", "All"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_table() {
        let service = InventoryService::new();
        service.replace(table_with("Desert Dome", "Aloe vera")).await;

        assert!(service.load(b"not a workbook").await.is_err());
        assert_eq!(service.require().await.unwrap().total_plants(), 1);
    }

    #[tokio::test]
    async fn test_search_through_service() {
        let service = InventoryService::new();
        service.replace(table_with("Desert Dome", "Aloe vera")).await;

        let hits = service.search("Desert Dome", "ALOE", &[]).await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = service
            .search("Desert Dome", "aloe", &["notes".to_string()])
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
