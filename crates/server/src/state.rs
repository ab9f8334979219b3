//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use call_qc_config::Settings;
use call_qc_core::ScoringMode;
use call_qc_pipeline::CallEvaluator;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Evaluator shared by all requests
    pub evaluator: Arc<CallEvaluator>,
    /// Mode used when a request does not pick one
    pub default_mode: ScoringMode,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Settings) -> Self {
        let evaluator = CallEvaluator::from_settings(&config);
        Self::with_evaluator(config, evaluator)
    }

    /// State around a prebuilt evaluator
    pub fn with_evaluator(config: Settings, evaluator: CallEvaluator) -> Self {
        let default_mode = config.scoring.mode;
        if default_mode.uses_oracle() && !evaluator.has_oracle() {
            tracing::warn!(mode = %default_mode, "No oracle configured, results will match rule mode");
        }

        Self {
            evaluator: Arc::new(evaluator),
            default_mode,
        }
    }
}
