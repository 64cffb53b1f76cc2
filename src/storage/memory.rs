//! In-memory table store
//!
//! Implements TableStore over rows held in process. Used for offline
//! development (tables loaded from a directory of `<table>.json` files) and
//! as the store behind the test suite.
//!
//! ## Security
//!
//! Fixture loading only reads `*.json` files directly inside the given
//! directory; subdirectories and other files are ignored.

use std::collections::{HashMap, HashSet};
#[cfg(feature = "native-fs")]
use std::path::Path;
use std::sync::RwLock;

use super::{Query, Row, StorageError, TableStore};
use async_trait::async_trait;
use serde_json::Value;
#[cfg(feature = "native-fs")]
use tracing::info;

/// In-memory table store
#[derive(Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryTableStore::insert_all`]
    pub fn with_table(self, table: &str, rows: Vec<Value>) -> Result<Self, StorageError> {
        self.insert_all(table, rows)?;
        Ok(self)
    }

    /// Append rows to a table, creating it if needed
    pub fn insert_all(&self, table: &str, rows: Vec<Value>) -> Result<(), StorageError> {
        let mut converted = Vec::with_capacity(rows.len());
        for value in rows {
            match value {
                Value::Object(row) => converted.push(row),
                other => {
                    return Err(StorageError::SerializationError(format!(
                        "Rows of {} must be JSON objects, got {}",
                        table, other
                    )));
                }
            }
        }

        let mut tables = self.write_tables()?;
        tables.entry(table.to_string()).or_default().extend(converted);
        Ok(())
    }

    /// Make every read of `table` fail with a backend error
    pub fn fail_table(&self, table: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(table.to_string());
        }
    }

    /// Snapshot of a table's rows in insertion order
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Load every `<table>.json` file in `dir`. Each file must hold a JSON
    /// array of row objects.
    #[cfg(feature = "native-fs")]
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        let store = Self::new();

        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            StorageError::IoError(format!("Failed to read {}: {}", dir.display(), e))
        })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(table) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = tokio::fs::read(&path).await.map_err(|e| {
                StorageError::IoError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let rows: Vec<Value> = serde_json::from_slice(&content).map_err(|e| {
                StorageError::SerializationError(format!(
                    "Failed to parse {}: {}",
                    path.display(),
                    e
                ))
            })?;

            info!(table, rows = rows.len(), "Loaded fixture table");
            store.insert_all(table, rows)?;
        }

        Ok(store)
    }

    fn write_tables(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Row>>>, StorageError> {
        self.tables
            .write()
            .map_err(|_| StorageError::BackendError("Table lock poisoned".to_string()))
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StorageError> {
        query.validate()?;

        let failing = self
            .failing
            .read()
            .map(|f| f.contains(&query.table))
            .unwrap_or(false);
        if failing {
            return Err(StorageError::BackendError(format!(
                "Read of {} failed",
                query.table
            )));
        }

        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::BackendError("Table lock poisoned".to_string()))?;
        let rows = tables
            .get(&query.table)
            .ok_or_else(|| StorageError::NotFound(query.table.clone()))?;

        Ok(query.apply(rows))
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StorageError> {
        let mut tables = self.write_tables()?;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StorageError::NotFound(table.to_string()))?;

        // updates touching zero rows succeed, matching the REST API
        for row in rows
            .iter_mut()
            .filter(|row| row.get("id").and_then(Value::as_str) == Some(id))
        {
            for (column, value) in &patch {
                row.insert(column.clone(), value.clone());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_select_unknown_table() {
        let store = MemoryTableStore::new();
        let result = store.select(&Query::table("courses")).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failing_table() {
        let store = MemoryTableStore::new()
            .with_table("news", vec![json!({"id": "a"})])
            .unwrap();
        store.fail_table("news");
        let result = store.select(&Query::table("news")).await;
        assert!(matches!(result, Err(StorageError::BackendError(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_column() {
        let store = MemoryTableStore::new()
            .with_table(
                "news",
                vec![json!({"id": "a", "view_count": 4}), json!({"id": "b", "view_count": 9})],
            )
            .unwrap();
        store
            .update("news", "a", super::super::patch([("view_count", json!(5))]))
            .await
            .unwrap();
        let rows = store.rows("news");
        assert_eq!(rows[0]["view_count"], json!(5));
        assert_eq!(rows[1]["view_count"], json!(9));
    }

    #[test]
    fn test_rejects_non_object_rows() {
        let result = MemoryTableStore::new().with_table("news", vec![json!([1, 2])]);
        assert!(matches!(result, Err(StorageError::SerializationError(_))));
    }
}
