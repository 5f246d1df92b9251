// Domain Layer - Pure business logic and entities

pub mod error;
pub mod fruit;

// Re-exports
pub use error::DomainError;
pub use fruit::{Fruit, FruitId, FruitUpdate, Fruits, NewFruit};
