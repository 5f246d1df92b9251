// SQLite FruitRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use fruits_core::domain::{Fruit, FruitId, FruitUpdate, Fruits, NewFruit};
use fruits_core::error::Result;
use fruits_core::port::{FruitRepository, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

const FRUIT_COLUMNS: &str = "id, name, emoji, season, created_at, modified_at";

pub struct SqliteFruitRepository {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteFruitRepository {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }

    async fn select_where(&self, predicate: &str, value: &str) -> Result<Fruits> {
        let rows: Vec<FruitRow> = sqlx::query_as(&format!(
            "SELECT {} FROM fruits WHERE {} ORDER BY id ASC",
            FRUIT_COLUMNS, predicate
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Fruit::from).collect())
    }
}

#[async_trait]
impl FruitRepository for SqliteFruitRepository {
    async fn insert(&self, fruit: &NewFruit) -> Result<Fruit> {
        let now = self.time_provider.now_millis();

        // NULL id lets SQLite assign the next rowid
        let row: FruitRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO fruits (id, name, emoji, season, created_at, modified_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            FRUIT_COLUMNS
        ))
        .bind(fruit.explicit_id())
        .bind(&fruit.name)
        .bind(&fruit.emoji)
        .bind(&fruit.season)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(fruit_id = row.id, "Inserted fruit");
        Ok(row.into())
    }

    async fn update(&self, id: FruitId, update: &FruitUpdate) -> Result<Option<Fruit>> {
        let now = self.time_provider.now_millis();

        let row: Option<FruitRow> = sqlx::query_as(&format!(
            r#"
            UPDATE fruits
            SET name = ?, emoji = ?, season = ?, modified_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            FRUIT_COLUMNS
        ))
        .bind(&update.name)
        .bind(&update.emoji)
        .bind(&update.season)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Fruit::from))
    }

    async fn delete_by_id(&self, id: FruitId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM fruits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM fruits")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn find_by_name(&self, name: &str) -> Result<Fruits> {
        self.select_where("lower(name) = lower(?)", name).await
    }

    async fn find_by_season(&self, season: &str) -> Result<Fruits> {
        self.select_where("lower(season) = lower(?)", season).await
    }

    async fn list_all(&self) -> Result<Fruits> {
        let rows: Vec<FruitRow> = sqlx::query_as(&format!(
            "SELECT {} FROM fruits ORDER BY id ASC",
            FRUIT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Fruit::from).collect())
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM fruits")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct FruitRow {
    id: i64,
    name: String,
    emoji: Option<String>,
    season: String,
    created_at: i64,
    modified_at: i64,
}

impl From<FruitRow> for Fruit {
    fn from(row: FruitRow) -> Self {
        Fruit {
            id: row.id,
            name: row.name,
            emoji: row.emoji,
            season: row.season,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use fruits_core::error::AppError;
    use fruits_core::port::FixedTimeProvider;

    async fn setup_test_db() -> (SqliteFruitRepository, Arc<FixedTimeProvider>) {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let clock = Arc::new(FixedTimeProvider::new(1_000));
        (SqliteFruitRepository::new(pool, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let (repo, _) = setup_test_db().await;

        let first = repo.insert(&NewFruit::new("Mango", "Spring")).await.unwrap();
        let second = repo.insert(&NewFruit::new("Pear", "Fall")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, 1_000);
        assert_eq!(first.modified_at, 1_000);
    }

    #[tokio::test]
    async fn test_insert_keeps_explicit_id() {
        let (repo, _) = setup_test_db().await;

        let stored = repo
            .insert(&NewFruit::new("Test Fruit", "Summer").with_id(11))
            .await
            .unwrap();
        assert_eq!(stored.id, 11);

        // Next generated id follows the highest existing one
        let next = repo.insert(&NewFruit::new("Kiwi", "Winter")).await.unwrap();
        assert_eq!(next.id, 12);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let (repo, _) = setup_test_db().await;
        repo.insert(&NewFruit::new("Lemon", "Winter").with_id(4))
            .await
            .unwrap();

        let err = repo
            .insert(&NewFruit::new("Orange", "Winter").with_id(4))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_name_is_not_unique() {
        let (repo, _) = setup_test_db().await;
        repo.insert(&NewFruit::new("Apple", "Fall")).await.unwrap();
        repo.insert(&NewFruit::new("apple", "Fall")).await.unwrap();

        let found = repo.find_by_name("APPLE").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_season_case_insensitive() {
        let (repo, _) = setup_test_db().await;
        repo.insert(&NewFruit::new("Banana", "Summer")).await.unwrap();
        repo.insert(&NewFruit::new("Orange", "Winter")).await.unwrap();

        for season in ["Summer", "summer", "SUMMER", "suMMEr"] {
            let found = repo.find_by_season(season).await.unwrap();
            assert_eq!(found.len(), 1, "season {}", season);
            assert_eq!(found[0].name, "Banana");
        }
        assert!(repo.find_by_season("Monsoon").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_is_idempotent() {
        let (repo, _) = setup_test_db().await;
        let kept = repo.insert(&NewFruit::new("Mango", "Spring")).await.unwrap();
        let gone = repo.insert(&NewFruit::new("Pear", "Fall")).await.unwrap();

        assert_eq!(repo.delete_by_id(gone.id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(gone.id).await.unwrap(), 0);

        assert_eq!(repo.list_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let (repo, _) = setup_test_db().await;
        repo.insert(&NewFruit::new("Mango", "Spring")).await.unwrap();
        repo.insert(&NewFruit::new("Pear", "Fall")).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_refreshes_modified_at() {
        let (repo, clock) = setup_test_db().await;
        let stored = repo
            .insert(&NewFruit::new("Strawbery", "Spring"))
            .await
            .unwrap();

        clock.advance(500);
        let update = FruitUpdate {
            name: "Strawberry".into(),
            emoji: Some("U+1F353".into()),
            season: "Spring".into(),
        };
        let updated = repo.update(stored.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.name, "Strawberry");
        assert_eq!(updated.created_at, 1_000);
        assert_eq!(updated.modified_at, 1_500);
        assert!(repo.update(99, &update).await.unwrap().is_none());
    }
}
