//! Main settings module

use std::path::Path;
use std::time::Duration;

use call_qc_core::ScoringMode;
use call_qc_scoring::DerivedPolicy;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "oracle.timeout_seconds".to_string(),
                message: "Timeout must be at least one second".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.oracle.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "oracle.temperature".to_string(),
                message: format!("Expected 0.0..=2.0, got {}", self.oracle.temperature),
            });
        }

        if self.oracle.provider == OracleProvider::OpenaiCompatible {
            if self.oracle.model.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "oracle.model".to_string(),
                    message: "Model name is required for the openai_compatible provider".to_string(),
                });
            }
            if self.oracle.base_url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "oracle.base_url".to_string(),
                    message: "Base URL is required for the openai_compatible provider".to_string(),
                });
            }
        }

        if let Some(prompt_file) = &self.oracle.prompt_file {
            if !Path::new(prompt_file).is_file() {
                tracing::warn!(prompt_file = %prompt_file, "Prompt file not found, default prompts will be used");
            }
        }

        Ok(())
    }
}

/// Scoring behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Default mode when a request does not choose one
    #[serde(default)]
    pub mode: ScoringMode,

    /// How understanding and process relate to ownership
    #[serde(default)]
    pub derived_policy: DerivedPolicy,
}

/// Oracle backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleProvider {
    /// No oracle; hybrid and llm modes fall back to rule output
    #[default]
    None,
    /// Deterministic canned replies
    Stub,
    /// Chat-completions HTTP API (Groq, OpenAI, OpenRouter, ...)
    OpenaiCompatible,
}

/// Language-model oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub provider: OracleProvider,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; falls back to `GROQ_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub temperature: f32,

    /// Optional TOML prompt bundle with `system` and `user_template`
    #[serde(default)]
    pub prompt_file: Option<String>,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_timeout_seconds() -> u64 {
    30
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::None,
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            temperature: 0.0,
            prompt_file: None,
        }
    }
}

impl OracleConfig {
    /// Configured key, else the environment fallback; blank keys count as missing
    pub fn resolved_api_key(&self) -> Option<String> {
        let non_blank = |k: &str| Some(k.trim().to_string()).filter(|k| !k.is_empty());
        self.api_key
            .as_deref()
            .and_then(non_blank)
            .or_else(|| std::env::var(API_KEY_ENV).ok().as_deref().and_then(non_blank))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from defaults, config files and environment
///
/// `path` names an extra TOML file that must exist.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(path) = path {
        if !Path::new(path).is_file() {
            return Err(ConfigError::FileNotFound(path.to_string()));
        }
        builder = builder.add_source(File::from(Path::new(path)).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix("CALL_QC")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
