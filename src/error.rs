//! Custom error types for spendtrack
//!
//! This module defines the error hierarchy for the tracker using thiserror.
//! Validation failures are surfaced to the caller unchanged; nothing in the
//! core recovers from them locally.

use thiserror::Error;

/// The main error type for spendtrack operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A title or category name is blank after trimming
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Another category already uses this name
    #[error("Category already exists: {0}")]
    DuplicateName(String),

    /// Record amounts must be strictly positive
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// Referenced category is not part of the registry
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A persisted timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Malformed user input (dates, months, indexes)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl TrackerError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::CategoryNotFound(identifier.into())
    }

    /// Check if this is a blank-name or duplicate-name error
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, Self::InvalidName(_) | Self::DuplicateName(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for spendtrack operations
pub type TrackerResult<T> = Result<T, TrackerError>;
