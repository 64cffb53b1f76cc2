//! Site configuration
//!
//! Loaded from an optional TOML file, then overridden by `ACADEMY_*`
//! environment variables. Every field has a default, so an empty file (or no
//! file) plus `ACADEMY_STORE_URL` is a complete configuration.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_STORE_URL: &str = "ACADEMY_STORE_URL";
pub const ENV_STORE_KEY: &str = "ACADEMY_STORE_KEY";
pub const ENV_BIND: &str = "ACADEMY_BIND";
pub const ENV_FIXTURES: &str = "ACADEMY_FIXTURES";

/// Configuration errors; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Read(String, String),
    #[error("Invalid config file: {0}")]
    Parse(String),
    #[error("Invalid bind address: {0}")]
    InvalidBind(String),
    #[error("No store URL configured and no fixtures directory given")]
    MissingStoreUrl,
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub site: SiteInfo,
}

/// HTTP server and logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080)),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Hosted table store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL; requests go to `{url}/rest/v1/{table}`
    pub url: String,
    /// Public (anon) API key
    pub anon_key: String,
    pub timeout_seconds: u64,
    /// `Cache-Control: max-age` sent with reads
    pub cache_max_age: u64,
    /// Serve `<table>.json` files from this directory instead of the store
    pub fixtures: Option<PathBuf>,
    /// The `courses` table has a `grade_band` column to read for the catalog
    pub grade_band_column: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_seconds: 10,
            cache_max_age: 60,
            fixtures: None,
            grade_band_column: false,
        }
    }
}

/// Branding and contact details shown in the header and footer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub inquiry_url: String,
    pub address: String,
    pub map_url: String,
    pub phone: String,
    pub email: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Wego Elite".to_string(),
            tagline: "Academic Excellence".to_string(),
            inquiry_url: "https://lin.ee/XO9mGNt".to_string(),
            address: "112, Taipei City, Beitou District, Section 1, Zhongyang N Rd, 72號2樓"
                .to_string(),
            map_url: "https://maps.app.goo.gl/ScDdTaahsYS4faAN9".to_string(),
            phone: "02-2898-3300".to_string(),
            email: "info@wegoelite.com.tw".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read `path` (if any), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `ACADEMY_*` overrides from `lookup`; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_STORE_URL) {
            self.store.url = url;
        }
        if let Some(key) = get(ENV_STORE_KEY) {
            self.store.anon_key = key;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind
                .parse()
                .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
        }
        if let Some(dir) = get(ENV_FIXTURES) {
            self.store.fixtures = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.fixtures.is_none() && self.store.url.trim().is_empty() {
            return Err(ConfigError::MissingStoreUrl);
        }
        if self.store.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout_seconds cannot be 0".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.store.timeout_seconds)
    }
}
