// Migration Runner

use crate::error::map_sqlx_error;
use fruits_core::error::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .map_err(map_sqlx_error)?;

    let current_version: i64 = if table_exists > 0 {
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await
            .map_err(map_sqlx_error)?
            .unwrap_or(0)
    } else {
        0
    };

    info!("Current schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying migration 001: fruits table");
        apply_migration(pool, include_str!("../migrations/001_create_fruits.sql")).await?;
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Drop every catalog table so the next `run_migrations` starts clean
pub async fn drop_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;
    for table in ["fruits", "schema_version"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }
    tx.commit().await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Apply a single migration SQL file inside one transaction
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    for statement in sql.split(';') {
        let clean_statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean_statement.is_empty() {
            sqlx::query(&clean_statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
    }

    tx.commit().await.map_err(map_sqlx_error)?;
    Ok(())
}
