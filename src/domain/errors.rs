//! Domain error types
//!
//! This module defines the error hierarchy for Domekeeper.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Domekeeper error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum DomekeeperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Spreadsheet parsing errors (fatal to an ingestion)
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Persisted store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A single record is missing a required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// External collaborator (classifier, text generator, image store) errors
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Spreadsheet parsing errors
///
/// Any of these aborts the whole ingestion; no partial table is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No row starts with the header sentinel
    #[error("Could not find header row with '{0}'")]
    HeaderNotFound(String),

    /// The workbook has no worksheets
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// The requested worksheet does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The container format could not be decoded
    #[error("Failed to decode spreadsheet: {0}")]
    Decode(String),
}

/// Persisted store errors
///
/// Errors that occur when talking to the plant store.
/// These errors don't expose third-party client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// A read against the store failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A create-many call failed
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    /// An id-addressed upsert call failed
    #[error("Upsert failed: {0}")]
    UpsertFailed(String),

    /// The store answered with something we could not interpret
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for DomekeeperError {
    fn from(err: std::io::Error) -> Self {
        DomekeeperError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DomekeeperError {
    fn from(err: serde_json::Error) -> Self {
        DomekeeperError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DomekeeperError {
    fn from(err: toml::de::Error) -> Self {
        DomekeeperError::Configuration(format!("TOML parse error: {err}"))
    }
}
