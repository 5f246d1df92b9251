// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid fruit id: {0} (must not be negative)")]
    NegativeId(i64),
}

pub type Result<T> = std::result::Result<T, DomainError>;
