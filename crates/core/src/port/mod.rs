// Port Layer - Interfaces for external dependencies

pub mod fruit_repository;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use fruit_repository::FruitRepository;
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
