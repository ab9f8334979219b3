//! Configuration for call quality scoring
//!
//! Settings are layered: built-in defaults, then `config/default.toml` if
//! present, then an explicit file, then `CALL_QC__*` environment variables.

pub mod settings;

pub use settings::{
    load_settings, ObservabilityConfig, OracleConfig, OracleProvider, ScoringConfig, ServerConfig,
    Settings,
};

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for call_qc_core::Error {
    fn from(err: ConfigError) -> Self {
        call_qc_core::Error::Config(err.to_string())
    }
}
