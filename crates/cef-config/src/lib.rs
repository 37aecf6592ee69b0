//! CEF Bridge Configuration
//!
//! Provides configuration management for embedders of the bridge:
//! - Bridge configuration (cef-bridge.toml): library location and logging
//! - Crash reporter settings, rendered to the native `crash_reporter.cfg`
//! - Configuration precedence and merging
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. User config (<config_dir>/cef-bridge/config.toml)
//! 2. Project config (./cef-bridge.toml, searched upwards)
//! 3. Environment variables (CEF_BRIDGE_*)
//!
//! # Example
//!
//! ```no_run
//! use cef_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("loading {}", config.library_name());
//! ```

pub mod bridge;
pub mod crash_reporter;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use bridge::{BridgeConfig, LibraryConfig, LoggingConfig};
pub use crash_reporter::{CrashKeySize, CrashReporterConfig};
pub use loader::{Config, ConfigLoader};
