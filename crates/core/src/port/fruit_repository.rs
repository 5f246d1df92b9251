// Fruit Repository Port (Interface)

use crate::domain::{Fruit, FruitId, FruitUpdate, Fruits, NewFruit};
use crate::error::Result;
use async_trait::async_trait;

/// Storage gateway for Fruit persistence
#[async_trait]
pub trait FruitRepository: Send + Sync {
    /// Insert a new fruit; storage assigns the id when none is given
    async fn insert(&self, fruit: &NewFruit) -> Result<Fruit>;

    /// Replace name/emoji/season of an existing fruit
    async fn update(&self, id: FruitId, update: &FruitUpdate) -> Result<Option<Fruit>>;

    /// Delete by id. Missing rows are not an error (returns 0)
    async fn delete_by_id(&self, id: FruitId) -> Result<u64>;

    /// Delete every fruit
    async fn delete_all(&self) -> Result<u64>;

    /// Case-insensitive exact match on name
    async fn find_by_name(&self, name: &str) -> Result<Fruits>;

    /// Case-insensitive exact match on season
    async fn find_by_season(&self, season: &str) -> Result<Fruits>;

    /// All fruits, order unspecified
    async fn list_all(&self) -> Result<Fruits>;

    /// Number of stored fruits
    async fn count(&self) -> Result<i64>;
}
