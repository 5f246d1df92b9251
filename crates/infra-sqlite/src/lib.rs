// Fruits Infrastructure - SQLite Adapter
// Implements: FruitRepository, schema migrations, fixture loading

mod connection;
mod error;
mod fixtures;
mod fruit_repository;
mod migration;

pub use connection::create_pool;
pub use fixtures::{load_fixtures, FixtureLoader, LoadedFixtures};
pub use fruit_repository::SqliteFruitRepository;
pub use migration::{drop_schema, run_migrations};

// Note: sqlx::Error conversion lives in error.rs as a helper function
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
