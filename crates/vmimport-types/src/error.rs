//! Error types for the import validation engine

use thiserror::Error;

/// Result type for import validation operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while loading inputs or configuration.
///
/// Problems detected in a well-formed descriptor are never errors; they are
/// reported as `ValidationFailure` data.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Descriptor could not be interpreted
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Invalid configuration detected
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Unknown check identifier
    #[error("Unknown check: {0}")]
    UnknownCheck(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Failed to read an input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
