//! Lox Configuration System
//!
//! Provides configuration management for the `lox` driver:
//! - Global user configuration (~/.lox/config.toml)
//! - Project configuration (lox.toml)
//! - Environment variable overrides
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.lox/config.toml)
//! 2. Project config (./lox.toml, searched upwards)
//! 3. Environment variables (LOX_*)
//! 4. CLI flags (applied by the driver)
//!
//! # Example
//!
//! ```no_run
//! use lox_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("prompt: {:?}", config.prompt());
//! ```

pub mod file;
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

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use file::{ColorSetting, ConfigFile, DiagnosticsFormat, LogLevel, UninitializedSetting};
pub use loader::{Config, ConfigLoader, PROJECT_CONFIG_FILE};
