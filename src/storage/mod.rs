//! Table store abstraction
//!
//! Defines the TableStore trait and implementations for the hosted table store:
//! - ApiTableStore: PostgREST-style HTTP API (production, default)
//! - MemoryTableStore: in-process rows, optionally loaded from JSON fixtures
//!   (offline development and tests)

use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod query;

pub use query::{Filter, Order, Query};

/// Error type for table store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Table not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Table store error: {0}")]
    BackendError(String),
}

/// A single row as returned by the store, keyed by column name.
pub type Row = Map<String, Value>;

/// Trait for table store backends
///
/// Reads are filtered, ordered and optionally limited through [`Query`].
/// The only write the site performs is a single-row patch by primary key.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Run a read query and return the matching rows in order
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StorageError>;

    /// Overwrite the given columns of the row whose `id` equals `id`
    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: TableStore + ?Sized> TableStore for std::sync::Arc<S> {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StorageError> {
        (**self).select(query).await
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StorageError> {
        (**self).update(table, id, patch).await
    }
}

/// Build a patch row from `(column, value)` pairs
pub fn patch<I, K>(columns: I) -> Row
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    columns.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[cfg(feature = "api-backend")]
pub mod api;

pub mod memory;
