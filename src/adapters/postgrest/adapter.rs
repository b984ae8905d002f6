//! PostgREST implementation of [`PlantStore`]

use crate::adapters::database::traits::{PlantFilter, PlantStore};
use crate::adapters::postgrest::client::PostgrestClient;
use crate::adapters::postgrest::models::{PlantPayload, PlantRow};
use crate::config::PostgrestConfig;
use crate::domain::{DomekeeperError, PersistedPlant, PlantId, PlantRecord, Result, StoreError};
use async_trait::async_trait;

const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_MERGE: &str = "resolution=merge-duplicates,return=minimal";

/// Rows per read request; PostgREST's default `max-rows`
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Plant store reached over PostgREST
pub struct PostgrestAdapter {
    client: PostgrestClient,
    page_size: usize,
}

impl PostgrestAdapter {
    pub fn new(config: &PostgrestConfig) -> Result<Self> {
        Ok(Self {
            client: PostgrestClient::new(config)?,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Rows requested per page when reading
    ///
    /// Must not exceed the server's `max-rows`, since a short page ends the
    /// read.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn client(&self) -> &PostgrestClient {
        &self.client
    }
}

/// Query parameters for a filtered read
fn filter_query(filter: &PlantFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "*".to_string())];
    if let Some(id) = &filter.id {
        query.push(("id", format!("eq.{id}")));
    }
    if let Some(name) = &filter.scientific_name {
        query.push(("scientific_name", format!("eq.{name}")));
    }
    if let Some(location) = &filter.location {
        query.push(("dome", format!("eq.{location}")));
    }
    query.push(("order", "scientific_name.asc,id.asc".to_string()));
    query
}

/// Query parameters for one page of a read
fn page_query(filter: &PlantFilter, offset: usize, limit: usize) -> Vec<(&'static str, String)> {
    let mut query = filter_query(filter);
    query.push(("limit", limit.to_string()));
    query.push(("offset", offset.to_string()));
    query
}

/// Re-labels a failed write so callers can tell inserts from upserts
fn write_error(error: DomekeeperError, wrap: fn(String) -> StoreError) -> DomekeeperError {
    match error {
        DomekeeperError::Store(store_error) => wrap(store_error.to_string()).into(),
        other => other,
    }
}

#[async_trait]
impl PlantStore for PostgrestAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client
            .select::<serde_json::Value>(&[("select", "id".to_string()), ("limit", "1".to_string())])
            .await?;
        tracing::info!(url = %self.client.table_url(), "PostgREST connection test successful");
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        // Tables cannot be created over REST; reaching the table is enough.
        self.test_connection().await
    }

    async fn fetch_plants(&self, filter: &PlantFilter) -> Result<Vec<PersistedPlant>> {
        let mut plants = Vec::new();
        let mut pages = 0;

        loop {
            let rows: Vec<PlantRow> = self
                .client
                .select(&page_query(filter, plants.len(), self.page_size))
                .await
                .map_err(|e| match e {
                    connection @ DomekeeperError::Store(StoreError::ConnectionFailed(_)) => connection,
                    DomekeeperError::Store(store_error) => {
                        StoreError::QueryFailed(store_error.to_string()).into()
                    }
                    other => other,
                })?;
            pages += 1;

            let last_page = rows.len() < self.page_size;
            for row in rows {
                plants.push(PersistedPlant::try_from(row)?);
            }
            if last_page {
                break;
            }
        }

        tracing::debug!(count = plants.len(), pages, "Fetched plants from PostgREST");
        Ok(plants)
    }

    async fn insert_many(&self, records: &[PlantRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let payload: Vec<PlantPayload<'_>> = records.iter().map(PlantPayload::new).collect();
        self.client
            .post(&payload, PREFER_MINIMAL, &[])
            .await
            .map_err(|e| write_error(e, StoreError::InsertFailed))?;

        tracing::debug!(count = records.len(), "Inserted plants over PostgREST");
        Ok(records.len())
    }

    async fn upsert_many(&self, records: &[(PlantId, PlantRecord)]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let payload: Vec<PlantPayload<'_>> = records
            .iter()
            .map(|(id, record)| PlantPayload::with_id(record, id))
            .collect();
        self.client
            .post(&payload, PREFER_MERGE, &[("on_conflict", "id".to_string())])
            .await
            .map_err(|e| write_error(e, StoreError::UpsertFailed))?;

        tracing::debug!(count = records.len(), "Upserted plants over PostgREST");
        Ok(records.len())
    }

    fn store_name(&self) -> &str {
        "postgrest"
    }
}
