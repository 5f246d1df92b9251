// Central Error Type for the Application

use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl AppError {
    /// True for failures caused by the caller's input rather than storage.
    /// Everything else is logged as a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Domain(_)
                | AppError::Validation(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
        )
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// sqlx::Error conversion is handled in infra-sqlite
// by mapping to AppError::Database / AppError::Conflict
