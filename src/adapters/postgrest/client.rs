//! HTTP client for a PostgREST (Supabase REST) endpoint

use crate::config::PostgrestConfig;
use crate::domain::{DomekeeperError, Result, StoreError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Thin wrapper over `reqwest` that knows one table's URL and credentials
pub struct PostgrestClient {
    client: Client,
    table_url: String,
}

impl PostgrestClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is not a valid header value or
    /// the HTTP client cannot be built.
    pub fn new(config: &PostgrestConfig) -> Result<Self> {
        let key = config.api_key.expose_secret().as_str();

        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(key)
            .map_err(|e| DomekeeperError::Configuration(format!("Invalid postgrest.api_key: {e}")))?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| DomekeeperError::Configuration(format!("Invalid postgrest.api_key: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DomekeeperError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let table_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.table.trim_matches('/')
        );

        Ok(Self { client, table_url })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    /// GET the table with query parameters and decode the rows
    pub async fn select<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<Vec<T>> {
        let response = self.send(self.client.get(&self.table_url).query(query)).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
    }

    /// POST rows to the table
    ///
    /// `prefer` is sent as the `Prefer` header; `query` carries options such as
    /// `on_conflict`.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        body: &B,
        prefer: &str,
        query: &[(&str, String)],
    ) -> Result<()> {
        let request = self
            .client
            .post(&self.table_url)
            .query(query)
            .header("Prefer", prefer)
            .json(body);
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %message, "PostgREST request failed");

        let error = if status.is_server_error() {
            StoreError::ServerError {
                status: status.as_u16(),
                message,
            }
        } else {
            StoreError::ClientError {
                status: status.as_u16(),
                message,
            }
        };
        Err(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(base_url: &str) -> PostgrestConfig {
        PostgrestConfig {
            base_url: base_url.to_string(),
            api_key: secret_string("service-key"),
            table: "plants".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_table_url_joins_without_double_slash() {
        let client = PostgrestClient::new(&config("https://demo.supabase.co/rest/v1/")).unwrap();
        assert_eq!(client.table_url(), "https://demo.supabase.co/rest/v1/plants");
    }

    #[test]
    fn test_invalid_key_is_configuration_error() {
        let mut config = config("https://demo.supabase.co/rest/v1");
        config.api_key = secret_string("line\nbreak");
        assert!(matches!(
            PostgrestClient::new(&config),
            Err(DomekeeperError::Configuration(_))
        ));
    }
}
