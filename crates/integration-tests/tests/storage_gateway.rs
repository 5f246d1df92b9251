//! Storage gateway tests against the fixture database

use fruits_core::domain::{Fruit, NewFruit};
use fruits_core::port::{FixedTimeProvider, FruitRepository};
use fruits_infra_sqlite::{create_pool, FixtureLoader, SqliteFruitRepository};
use std::sync::Arc;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/fixtures.yaml");

#[tokio::test]
async fn test_fixture_rows_are_stored() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    let clock = Arc::new(FixedTimeProvider::new(42_000));
    let loaded = FixtureLoader::new(pool.clone())
        .with_time_provider(clock.clone())
        .recreate_tables(true)
        .load(FIXTURES)
        .await
        .unwrap();
    assert_eq!(loaded.len(), 9);

    let repo = SqliteFruitRepository::new(pool, clock);
    let expected = loaded.row("mango").unwrap();
    let actual = repo.find_by_name("Mango").await.unwrap();

    assert_eq!(actual, vec![expected.clone()]);
    assert_eq!(actual[0].id, 1);
    assert_eq!(actual[0].created_at, 42_000);
}

#[tokio::test]
async fn test_next_id_follows_fixtures() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    FixtureLoader::new(pool.clone())
        .recreate_tables(true)
        .load(FIXTURES)
        .await
        .unwrap();

    let repo = SqliteFruitRepository::new(pool, Arc::new(FixedTimeProvider::new(0)));
    let stored = repo.insert(&NewFruit::new("Kiwi", "Winter")).await.unwrap();
    assert_eq!(stored.id, 10);

    let mut winter = repo.find_by_season("WINTER").await.unwrap();
    winter.sort();
    assert_eq!(
        winter,
        vec![
            Fruit::new(3, "Orange", Some("U+1F34A"), "Winter"),
            Fruit::new(4, "Lemon", Some("U+1F34B"), "Winter"),
            Fruit::new(10, "Kiwi", None, "Winter"),
        ]
    );
}

#[tokio::test]
async fn test_reload_restores_known_state() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    let loader = FixtureLoader::new(pool.clone()).recreate_tables(true);
    loader.load(FIXTURES).await.unwrap();

    let repo = SqliteFruitRepository::new(pool, Arc::new(FixedTimeProvider::new(0)));
    repo.delete_all().await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);

    loader.load(FIXTURES).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 9);
}
