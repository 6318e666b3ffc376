//! Error types for the ML service client.

use thiserror::Error;

/// Result type for ML client operations.
pub type Result<T> = std::result::Result<T, MlError>;

/// ML service client errors.
#[derive(Debug, Error)]
pub enum MlError {
    /// Configuration error (bad base URL, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response or success=false payload)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
