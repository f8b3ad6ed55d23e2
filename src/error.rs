//! Error types for the Corpsman engine.
//!
//! All failures are represented by the [`CorpsmanError`] enum. Only two
//! classes of error ever reach a caller: ingestion failures (a corpus that
//! yields zero usable segments cannot answer queries) and snapshot I/O.
//! Query-time components report absence through `Option`/empty results,
//! never through this type.

use std::io;

use thiserror::Error;

/// The main error type for Corpsman operations.
#[derive(Error, Debug)]
pub enum CorpsmanError {
    /// I/O errors (snapshot files, corpus document files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Document ingestion errors.
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// A lookup (segment by id) found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Index build errors.
    #[error("Index error: {0}")]
    Index(String),

    /// Snapshot serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Static configuration errors (formulary, clarification topics).
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CorpsmanError.
pub type Result<T> = std::result::Result<T, CorpsmanError>;

impl CorpsmanError {
    /// Create a new ingestion error.
    pub fn ingestion<S: Into<String>>(msg: S) -> Self {
        CorpsmanError::Ingestion(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CorpsmanError::NotFound(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        CorpsmanError::Index(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CorpsmanError::Serialization(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CorpsmanError::Config(msg.into())
    }
}
