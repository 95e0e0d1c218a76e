//! Error types for name generation.

use thiserror::Error;

/// Name generation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamesError {
    /// The requested style is not one of the built-in styles.
    #[error("unknown style: {0}")]
    UnknownStyle(String),
}

/// Result type for name generation operations.
pub type NamesResult<T> = Result<T, NamesError>;
