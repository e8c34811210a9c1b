//! Error Handling Module
//!
//! Defines the error type for manifest reading, reporting and chart output.
//! Uses thiserror for ergonomic error definitions.
//!
//! Missing manifests, empty manifests and malformed lines are not errors:
//! they are ordinary per-split outcomes (see [`crate::report::SplitStatus`]).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dataset distribution operations
#[derive(Error, Debug)]
pub enum DistributionError {
    /// A manifest exists but could not be read (permissions, invalid UTF-8, ...)
    #[error("Failed to read manifest '{0}': {1}")]
    ManifestRead(PathBuf, String),

    /// Error while drawing or saving a chart
    #[error("Chart error: {0}")]
    Chart(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DistributionError {
    fn from(err: serde_json::Error) -> Self {
        DistributionError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DistributionError {
    fn from(err: toml::de::Error) -> Self {
        DistributionError::Config(err.to_string())
    }
}

#[cfg(feature = "charts")]
impl From<image::ImageError> for DistributionError {
    fn from(err: image::ImageError) -> Self {
        DistributionError::Chart(err.to_string())
    }
}

/// Convenience Result type for dataset distribution operations
pub type Result<T> = std::result::Result<T, DistributionError>;
