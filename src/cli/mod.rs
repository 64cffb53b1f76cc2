//! CLI module for the academy-site binary

pub mod error;
pub mod logging;

pub use error::CliError;
pub use logging::init_tracing;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::config::{SiteConfig, StoreConfig};
use crate::storage::TableStore;
use crate::storage::api::ApiTableStore;
use crate::storage::memory::MemoryTableStore;

/// Wego Elite Academy site server
#[derive(Parser, Debug, Default)]
#[command(name = "academy-site")]
#[command(about = "Serve the academy marketing site from the hosted table store")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overriding the configuration
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Serve `<table>.json` files from this directory instead of the store
    #[arg(long)]
    pub fixtures: Option<PathBuf>,
}

impl Args {
    /// Load and validate the configuration; flags override file and environment
    pub fn load_config(&self) -> Result<SiteConfig, CliError> {
        let mut config = SiteConfig::load(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(fixtures) = &self.fixtures {
            config.store.fixtures = Some(fixtures.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Open the configured store: fixtures when given, else the hosted API
pub async fn build_store(config: &StoreConfig) -> Result<Arc<dyn TableStore>, CliError> {
    if let Some(dir) = &config.fixtures {
        info!("Serving fixtures from {}", dir.display());
        let store = MemoryTableStore::load_dir(dir).await?;
        return Ok(Arc::new(store));
    }

    let key = Some(config.anon_key.clone()).filter(|k| !k.is_empty());
    let store = ApiTableStore::new(config.url.clone(), key)
        .with_timeout(std::time::Duration::from_secs(config.timeout_seconds))?
        .with_cache_max_age(config.cache_max_age);
    info!("Reading from {}", config.url);
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::COURSES;
    use crate::storage::Query;

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            bind: Some("127.0.0.1:9090".parse().unwrap()),
            fixtures: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.server.bind.port(), 9090);
        assert_eq!(config.store.fixtures.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["academy-site", "--bind", "0.0.0.0:80", "--fixtures", "data"]).unwrap();
        assert_eq!(args.bind.map(|b| b.port()), Some(80));
        assert_eq!(args.fixtures, Some(PathBuf::from("data")));
        assert!(Args::try_parse_from(["academy-site", "--bind", "nowhere"]).is_err());
    }

    #[tokio::test]
    async fn test_fixture_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("courses.json"),
            r#"[{"id": "00000000-0000-0000-0000-000000000001", "title": "A", "is_active": true}]"#,
        )
        .unwrap();
        let config = StoreConfig {
            fixtures: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let store = build_store(&config).await.unwrap();
        let rows = store.select(&Query::table(COURSES)).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
