//! Declarative fixture loading
//!
//! Fixture files are YAML lists of `{model, rows}` sets. Each row may carry an
//! `_id` label so tests can look the stored record up afterwards:
//!
//! ```yaml
//! - model: Fruit
//!   rows:
//!     - _id: mango
//!       id: 1
//!       name: Mango
//!       emoji: U+1F96D
//!       season: Spring
//! ```

use crate::connection::create_pool;
use crate::fruit_repository::SqliteFruitRepository;
use crate::migration::{drop_schema, run_migrations};
use fruits_core::domain::{Fruit, FruitId, NewFruit};
use fruits_core::error::{AppError, Result};
use fruits_core::port::{FruitRepository, SystemTimeProvider, TimeProvider};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct FixtureSet {
    model: String,
    #[serde(default)]
    rows: Vec<FixtureRow>,
}

#[derive(Debug, Deserialize)]
struct FixtureRow {
    #[serde(rename = "_id")]
    label: Option<String>,
    id: Option<FruitId>,
    name: String,
    emoji: Option<String>,
    season: String,
}

impl FixtureRow {
    fn to_new_fruit(&self) -> NewFruit {
        NewFruit {
            id: self.id,
            name: self.name.clone(),
            emoji: self.emoji.clone(),
            season: self.season.clone(),
        }
    }
}

/// Records stored by a fixture load
#[derive(Debug, Default)]
pub struct LoadedFixtures {
    fruits: Vec<Fruit>,
    labels: HashMap<String, usize>,
}

impl LoadedFixtures {
    /// Stored fruit for an `_id` label
    pub fn row(&self, label: &str) -> Option<&Fruit> {
        self.labels.get(label).map(|&idx| &self.fruits[idx])
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }
}

/// Loads fixture files into the fruits table
pub struct FixtureLoader {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
    recreate_tables: bool,
}

impl FixtureLoader {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            time_provider: Arc::new(SystemTimeProvider),
            recreate_tables: false,
        }
    }

    pub fn with_time_provider(mut self, time_provider: Arc<dyn TimeProvider>) -> Self {
        self.time_provider = time_provider;
        self
    }

    /// Drop and re-create the schema before inserting rows
    pub fn recreate_tables(mut self, recreate: bool) -> Self {
        self.recreate_tables = recreate;
        self
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> Result<LoadedFixtures> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path).await?;
        info!(path = %path.display(), "Loading fixtures");
        self.load_str(&yaml).await
    }

    pub async fn load_str(&self, yaml: &str) -> Result<LoadedFixtures> {
        let sets: Vec<FixtureSet> = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Validation(format!("Invalid fixture file: {}", e)))?;

        // Reject the whole file before the schema is touched
        if let Some(set) = sets.iter().find(|set| !is_fruit_model(&set.model)) {
            return Err(AppError::Validation(format!(
                "Unknown fixture model: {}",
                set.model
            )));
        }

        if self.recreate_tables {
            drop_schema(&self.pool).await?;
        }
        run_migrations(&self.pool).await?;

        let repo = SqliteFruitRepository::new(self.pool.clone(), self.time_provider.clone());
        let mut loaded = LoadedFixtures::default();

        for set in &sets {
            for row in &set.rows {
                let stored = repo.insert(&row.to_new_fruit()).await?;
                if let Some(label) = &row.label {
                    loaded.labels.insert(label.clone(), loaded.fruits.len());
                }
                loaded.fruits.push(stored);
            }
        }

        info!(rows = loaded.len(), "Fixtures loaded");
        Ok(loaded)
    }
}

fn is_fruit_model(model: &str) -> bool {
    model.eq_ignore_ascii_case("fruit") || model.eq_ignore_ascii_case("fruits")
}

/// Open `database_url`, recreate the schema and load the fixture file
pub async fn load_fixtures(database_url: &str, path: impl AsRef<Path>) -> Result<SqlitePool> {
    let pool = create_pool(database_url).await?;
    FixtureLoader::new(pool.clone())
        .recreate_tables(true)
        .load(path)
        .await?;
    Ok(pool)
}
