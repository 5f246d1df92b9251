// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use fruits_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Create SQLite connection pool with WAL mode
///
/// Accepts a file path, a `sqlite:` URL, or `:memory:`.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Config(format!("Invalid database url {}: {}", database_url, e)))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);

    let pool = pool_options(is_in_memory(database_url))
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;

    debug!(database_url, "SQLite pool ready");
    Ok(pool)
}

/// An in-memory database lives only as long as one of its connections,
/// so such pools never let their last connection go.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new().max_connections(10);
    if in_memory {
        options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
