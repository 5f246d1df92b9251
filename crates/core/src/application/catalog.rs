// Fruit Catalog Service - Core use cases for the fruits API

use crate::domain::{Fruit, FruitId, FruitUpdate, Fruits, NewFruit};
use crate::error::{AppError, Result};
use crate::port::FruitRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound for a single storage call unless configured otherwise
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fruit Catalog Service
///
/// Validates input and bounds every repository call by `storage_timeout`.
/// Cloning is cheap; the repository is shared.
#[derive(Clone)]
pub struct FruitCatalog {
    repo: Arc<dyn FruitRepository>,
    storage_timeout: Duration,
}

impl FruitCatalog {
    pub fn new(repo: Arc<dyn FruitRepository>, storage_timeout: Duration) -> Self {
        Self {
            repo,
            storage_timeout,
        }
    }

    pub fn storage_timeout(&self) -> Duration {
        self.storage_timeout
    }

    /// Add a fruit, returning the stored record
    pub async fn add(&self, fruit: NewFruit) -> Result<Fruit> {
        fruit.validate()?;

        let stored = self.bounded(self.repo.insert(&fruit)).await?;
        debug!(fruit_id = stored.id, name = %stored.name, "Fruit added");
        Ok(stored)
    }

    /// Replace an existing fruit's fields
    pub async fn update(&self, id: FruitId, update: FruitUpdate) -> Result<Fruit> {
        update.validate()?;

        self.bounded(self.repo.update(id, &update))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fruit {} not found", id)))
    }

    /// Remove one fruit; a missing id is not an error
    pub async fn remove(&self, id: FruitId) -> Result<()> {
        let deleted = self.bounded(self.repo.delete_by_id(id)).await?;
        debug!(fruit_id = id, deleted, "Delete by id");
        Ok(())
    }

    pub async fn remove_all(&self) -> Result<()> {
        let deleted = self.bounded(self.repo.delete_all()).await?;
        debug!(deleted, "Deleted all fruits");
        Ok(())
    }

    pub async fn by_name(&self, name: &str) -> Result<Fruits> {
        self.bounded(self.repo.find_by_name(name)).await
    }

    pub async fn by_season(&self, season: &str) -> Result<Fruits> {
        self.bounded(self.repo.find_by_season(season)).await
    }

    pub async fn list(&self) -> Result<Fruits> {
        self.bounded(self.repo.list_all()).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.bounded(self.repo.count()).await
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.storage_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.storage_timeout.as_millis() as u64,
                    "Storage call timed out"
                );
                Err(AppError::Timeout(self.storage_timeout))
            }
        }
    }
}
