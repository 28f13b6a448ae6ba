//! Error types for gazetteer
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using GazetteerError
pub type Result<T> = std::result::Result<T, GazetteerError>;

/// Unified error type for gazetteer operations
#[derive(Debug, Error)]
pub enum GazetteerError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {attribute}: {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        reason: String,
    },

    #[error("Unknown attribute: '{0}'")]
    UnknownAttribute(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("City '{name}' in region '{region}' not found")]
    NotFound { name: String, region: String },

    #[error("A city named '{name}' in region '{region}' already exists")]
    Conflict { name: String, region: String },

    // -------------------------------------------------------------------------
    // Aggregate Errors
    // -------------------------------------------------------------------------
    #[error("No cities available")]
    NoData,

    // -------------------------------------------------------------------------
    // Decode Errors (strict mode only)
    // -------------------------------------------------------------------------
    #[error("Malformed record line: {0}")]
    Parse(String),
}
