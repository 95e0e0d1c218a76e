//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key does not have the `XXXXX-XXXXX-XXXXX-XXXXX` shape.
    #[error("invalid license key format: {0}")]
    InvalidKeyFormat(String),

    /// Key has the right shape but fails both the allow-list and the checksum.
    #[error("license key rejected")]
    Rejected,

    /// Activation file could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
