// Application Layer - Use Cases

pub mod catalog;

// Re-exports
pub use catalog::{FruitCatalog, DEFAULT_STORAGE_TIMEOUT};
