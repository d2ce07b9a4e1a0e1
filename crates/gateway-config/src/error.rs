//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The file extension is not a known format
    #[error("Unsupported config format for {path}; expected .yaml, .yml or .toml")]
    UnsupportedFormat {
        /// File path
        path: PathBuf,
    },

    /// An environment variable held an unusable value
    #[error("Invalid value for environment variable {name}: {message}")]
    Env {
        /// Variable name
        name: String,
        /// What was wrong
        message: String,
    },

    /// The merged configuration failed validation
    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
