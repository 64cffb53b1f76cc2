//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Startup failures of the site binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store setup failed: {0}")]
    Store(#[from] StorageError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
