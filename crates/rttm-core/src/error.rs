//! Error types for the RTTM validator
//!
//! Validation findings are reported as [`Diagnostic`](crate::Diagnostic)
//! values, not errors. The types here cover failures that stop a run before
//! any verdict exists: unreadable files, bad configuration, output encoding.

use thiserror::Error;

/// Main error type for validator operations
#[derive(Error, Debug)]
pub enum RttmError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Configuration loading or value error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RttmError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RttmError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        RttmError::FileError(msg.into())
    }

    /// Create a configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        RttmError::ConfigError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RttmError::InvalidInput(_) | RttmError::FileError(_) | RttmError::ConfigError(_)
        )
    }
}

impl From<std::io::Error> for RttmError {
    fn from(err: std::io::Error) -> Self {
        RttmError::FileError(err.to_string())
    }
}

impl From<toml::de::Error> for RttmError {
    fn from(err: toml::de::Error) -> Self {
        RttmError::ConfigError(format!("TOML error: {}", err))
    }
}

impl From<serde_json::Error> for RttmError {
    fn from(err: serde_json::Error) -> Self {
        RttmError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for RttmError {
    fn from(err: serde_yaml::Error) -> Self {
        RttmError::SerializationError(format!("YAML error: {}", err))
    }
}

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, RttmError>;
