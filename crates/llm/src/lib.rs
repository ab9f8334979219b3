//! Language-model oracle support
//!
//! Provides:
//! - `CannedOracle`: deterministic replies for tests and offline runs
//! - `ChatCompletionsOracle`: OpenAI-compatible chat completions over HTTP
//! - Prompt bundle with an optional TOML override
//! - Best-effort extraction of a JSON reply from free-form model output

pub mod canned;
pub mod http;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use call_qc_config::{OracleConfig, OracleProvider};
use call_qc_core::Oracle;
use thiserror::Error;

pub use canned::{CannedOracle, DEFAULT_KEY};
pub use http::ChatCompletionsOracle;
pub use parse::{extract_json_object, OracleReply, ReplyError};
pub use prompt::{PromptBundle, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_TEMPLATE};

/// Errors from this crate's fallible helpers
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Failed to read prompt bundle: {0}")]
    PromptIo(#[from] std::io::Error),

    #[error("Failed to parse prompt bundle: {0}")]
    PromptParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;

/// Create an oracle from configuration
///
/// Returns `None` when no provider is configured or the HTTP provider has
/// no API key; callers then keep rule-based results.
pub fn create_oracle(config: &OracleConfig) -> Option<Arc<dyn Oracle>> {
    match config.provider {
        OracleProvider::None => None,
        OracleProvider::Stub => Some(Arc::new(CannedOracle::new())),
        OracleProvider::OpenaiCompatible => match ChatCompletionsOracle::from_config(config) {
            Ok(oracle) => {
                tracing::info!(model = %config.model, base_url = %config.base_url, "Using chat-completions oracle");
                Some(Arc::new(oracle))
            }
            Err(e) => {
                tracing::warn!("Oracle disabled: {}", e);
                None
            }
        },
    }
}
