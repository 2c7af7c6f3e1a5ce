//! Error types for the generation engine.

use thiserror::Error;

/// Result type for engine operations.
pub type TcResult<T> = Result<T, TcError>;

/// Errors surfaced by the engines and the calendar.
///
/// None of these leave engine state partially mutated: an operation that
/// returns an error has not committed anything.
#[derive(Debug, Error)]
pub enum TcError {
    /// A required selection is missing or a value is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A lookup key has no entry in the loaded tables.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The referenced item no longer exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// Writing state back to the data source failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}
