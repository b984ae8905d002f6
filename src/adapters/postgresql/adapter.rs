//! PostgreSQL implementation of [`PlantStore`]

use crate::adapters::database::traits::{PlantFilter, PlantStore};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    insert_statement, plant_from_row, select_columns, upsert_statement, PlantColumns,
};
use crate::domain::{DomekeeperError, PersistedPlant, PlantId, PlantRecord, Result, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

const PLANTS_TABLE: &str = "plants";

/// Wraps a [`PostgreSQLClient`] as a plant store
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn new_with_arc(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

/// `SELECT` for a filter, with its parameters in placeholder order
fn select_query(filter: &PlantFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(id) = &filter.id {
        params.push(id.to_string());
        conditions.push(format!("id::text = ${}", params.len()));
    }
    if let Some(name) = &filter.scientific_name {
        params.push(name.clone());
        conditions.push(format!("scientific_name = ${}", params.len()));
    }
    if let Some(location) = &filter.location {
        params.push(location.clone());
        conditions.push(format!("dome = ${}", params.len()));
    }

    let mut query = format!("SELECT {} FROM {PLANTS_TABLE}", select_columns());
    if !conditions.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }
    query.push_str(" ORDER BY scientific_name");
    (query, params)
}

#[async_trait]
impl PlantStore for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn fetch_plants(&self, filter: &PlantFilter) -> Result<Vec<PersistedPlant>> {
        let (query, params) = select_query(filter);
        let bind: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        let rows = self.client.query(&query, &bind).await?;
        let plants = rows.iter().map(plant_from_row).collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            count = plants.len(),
            filtered = !filter.is_unfiltered(),
            "Fetched plants from PostgreSQL"
        );
        Ok(plants)
    }

    async fn insert_many(&self, records: &[PlantRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let columns = PlantColumns::from_records(records);
        let inserted = self
            .client
            .execute(&insert_statement(PLANTS_TABLE), &columns.params())
            .await
            .map_err(|e| match e {
                DomekeeperError::Store(StoreError::QueryFailed(msg)) => {
                    StoreError::InsertFailed(msg).into()
                }
                other => other,
            })?;

        tracing::debug!(count = inserted, "Inserted plants into PostgreSQL");
        Ok(inserted as usize)
    }

    async fn upsert_many(&self, records: &[(PlantId, PlantRecord)]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = records.iter().map(|(id, _)| id.to_string()).collect();
        let columns = PlantColumns::from_records(records.iter().map(|(_, record)| record));

        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(13);
        params.push(&ids);
        params.extend(columns.params());

        let written = self
            .client
            .execute(&upsert_statement(PLANTS_TABLE), &params)
            .await
            .map_err(|e| match e {
                DomekeeperError::Store(StoreError::QueryFailed(msg)) => {
                    StoreError::UpsertFailed(msg).into()
                }
                other => other,
            })?;

        tracing::debug!(count = written, "Upserted plants into PostgreSQL");
        Ok(written as usize)
    }

    fn store_name(&self) -> &str {
        "postgresql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_select_reads_everything_in_name_order() {
        let (query, params) = select_query(&PlantFilter::all());
        assert_eq!(
            query,
            format!("SELECT {} FROM plants ORDER BY scientific_name", select_columns())
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_filter_fields_become_numbered_conditions() {
        let filter = PlantFilter::by_scientific_name("Aloe vera", Some("Desert Dome".to_string()));
        let (query, params) = select_query(&filter);

        assert!(query.ends_with("WHERE scientific_name = $1 AND dome = $2 ORDER BY scientific_name"));
        assert_eq!(params, vec!["Aloe vera", "Desert Dome"]);

        let (query, params) = select_query(&PlantFilter::by_id(PlantId::new("abc").unwrap()));
        assert!(query.contains("WHERE id::text = $1"));
        assert_eq!(params, vec!["abc"]);
    }
}
