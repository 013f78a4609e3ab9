//! Error types for the social-metrics library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.
//!
//! Classification and report failures are deliberately absent from this enum:
//! the classifier degrades to a fixed fallback suggestion and the report
//! generator returns an explanatory document body, so neither crosses the
//! primary workflow as an error.

use thiserror::Error;

/// Errors that can occur in the social-metrics application.
#[derive(Error, Debug)]
pub enum TabulationError {
    /// Input rejected at the boundary before anything is persisted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Durable store unavailable or a write failed; no partial row remains
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `TabulationError`
pub type Result<T> = std::result::Result<T, TabulationError>;

impl From<r2d2::Error> for TabulationError {
    fn from(err: r2d2::Error) -> Self {
        TabulationError::Pool(err.to_string())
    }
}

impl From<config::ConfigError> for TabulationError {
    fn from(err: config::ConfigError) -> Self {
        TabulationError::InvalidConfig(err.to_string())
    }
}

impl From<anyhow::Error> for TabulationError {
    fn from(err: anyhow::Error) -> Self {
        TabulationError::Other(err.to_string())
    }
}
