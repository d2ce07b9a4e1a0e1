//! # Gateway Config
//!
//! Configuration management for the assistant gateway.
//!
//! Configuration is layered: built-in defaults, then an optional YAML or
//! TOML file, then environment variables. The result is validated before
//! use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ENV_API_KEY};
pub use types::{GatewayConfig, LogFormat, LoggingSettings, ProviderSettings, ServerSettings};
