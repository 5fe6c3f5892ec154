//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid epoch timestamp: {0:?}")]
    InvalidEpoch(String),

    #[error("Invalid catalog timestamp: {0:?}")]
    InvalidCatalogTime(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
