//! Daemon configuration
//!
//! Defaults overridden by `FRUITS_*` environment variables
//! (e.g. `FRUITS_DB_PATH`, `FRUITS_HTTP_PORT`).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_TYPE: &str = "sqlite";
const DEFAULT_DB_PATH: &str = "~/.fruits/fruits.db";
const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_LOG_FORMAT: &str = "pretty";
const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub db_type: String,
    pub db_path: String,
    pub http_host: String,
    pub http_port: u16,
    #[serde(default)]
    pub cors_permissive: bool,
    pub log_format: String,
    pub storage_timeout_ms: u64,
    /// YAML fixture file loaded into a fresh schema at startup
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("FRUITS").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("db_type", DEFAULT_DB_TYPE)?
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("http_host", DEFAULT_HTTP_HOST)?
            .set_default("http_port", DEFAULT_HTTP_PORT as i64)?
            .set_default("log_format", DEFAULT_LOG_FORMAT)?
            .set_default("storage_timeout_ms", DEFAULT_STORAGE_TIMEOUT_MS as i64)?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?;

        let config: DaemonConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.db_type.eq_ignore_ascii_case("sqlite") {
            bail!(
                "Unsupported database type '{}' (only 'sqlite' is available)",
                self.db_type
            );
        }
        if self.storage_timeout_ms == 0 {
            bail!("storage_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Database location with `~` expanded; `:memory:` passes through
    pub fn database_url(&self) -> String {
        shellexpand::tilde(&self.db_path).into_owned()
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.contains(":memory:")
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}
