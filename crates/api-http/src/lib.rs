//! HTTP API Layer
//!
//! REST endpoints for the fruits catalog. Each handler maps one route to one
//! `FruitCatalog` operation.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use server::{build_router, AppState, HttpServer, HttpServerConfig, ServerHandle};
