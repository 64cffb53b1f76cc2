//! API table store
//!
//! Implements TableStore for a PostgREST-style HTTP API (the hosted
//! backend-as-a-service the site reads from).
//!
//! ## Security
//!
//! Table and column identifiers are validated before they are placed into
//! request paths. Filter values are sent as encoded query parameters.

use std::time::Duration;

use super::{Query, Row, StorageError, TableStore, query::validate_identifier};
use async_trait::async_trait;
use tracing::debug;

/// Path prefix of the REST surface on the hosted store
const REST_PREFIX: &str = "/rest/v1";

/// API table store that communicates with the hosted REST API
pub struct ApiTableStore {
    base_url: String,
    api_key: Option<String>,
    cache_max_age: u64,
    client: reqwest::Client,
}

impl ApiTableStore {
    /// Create a new API table store
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the project (e.g., "https://project.supabase.co")
    /// * `api_key` - Optional anonymous key, sent as `apikey` and bearer token
    ///
    /// # Example
    ///
    /// ```rust
    /// use academy_site::storage::api::ApiTableStore;
    ///
    /// let store = ApiTableStore::new(
    ///     "https://project.supabase.co",
    ///     Some("anon_key_here".to_string()),
    /// );
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            cache_max_age: 60,
            client: reqwest::Client::new(),
        }
    }

    /// Set a request timeout on the underlying client
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, StorageError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::BackendError(format!("Failed to build client: {}", e)))?;
        Ok(self)
    }

    /// `Cache-Control: max-age` sent with every read
    pub fn with_cache_max_age(mut self, seconds: u64) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Build a request with authentication headers
    fn build_request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            REST_PREFIX,
            urlencoding::encode(table)
        );
        let mut request = self.client.request(method, &url);

        if let Some(ref key) = self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        request
    }
}

#[async_trait]
impl TableStore for ApiTableStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StorageError> {
        query.validate()?;

        let response = self
            .build_request(reqwest::Method::GET, &query.table)
            .header("Cache-Control", format!("max-age={}", self.cache_max_age))
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| {
                StorageError::NetworkError(format!("Failed to read {}: {}", query.table, e))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(query.table.clone()));
        }
        if !status.is_success() {
            return Err(StorageError::BackendError(format!(
                "Read of {} failed: {}",
                query.table, status
            )));
        }

        let rows: Vec<Row> = response.json().await.map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse {} rows: {}", query.table, e))
        })?;

        debug!(table = %query.table, rows = rows.len(), "table store read");
        Ok(rows)
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StorageError> {
        validate_identifier(table)?;
        for column in patch.keys() {
            validate_identifier(column)?;
        }

        let response = self
            .build_request(reqwest::Method::PATCH, table)
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{}", id))])
            .json(&patch)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(format!("Failed to update {}: {}", table, e)))?;

        if !response.status().is_success() {
            return Err(StorageError::BackendError(format!(
                "Update of {} failed: {}",
                table,
                response.status()
            )));
        }

        Ok(())
    }
}
