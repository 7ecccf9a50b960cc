//! Error types for the table view engine.

use thiserror::Error;

/// All possible errors from the table view engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Caller errors
    #[error("invalid column: {0} (sortable columns are first, last, country)")]
    InvalidColumn(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    // Collation setup
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    #[error("collator unavailable: {0}")]
    Collation(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
