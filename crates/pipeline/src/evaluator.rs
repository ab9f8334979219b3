//! Per-call evaluation entry point

use std::collections::BTreeMap;

use call_qc_config::Settings;
use call_qc_core::{
    CallEvaluation, CallTranscript, Criterion, CriterionResult, Probability, ScoringMode,
};
use call_qc_llm::{create_oracle, PromptBundle};
use call_qc_scoring::{create_policy, RuleScorer};
use serde_json::Value;

use crate::orchestrator::{HybridOverrideOrchestrator, OverrideOutcome};

/// Calls shorter than this are not judged
pub const SHORT_CALL_SECS: f64 = 0.1;

/// Reasoning attached to every criterion of a short or empty call
pub const SHORT_CALL_REASONING: &str =
    "Call is empty or too short to evaluate; all criteria default to 0.";

/// Runs rule scoring and the optional oracle override for one call
#[derive(Debug, Clone, Default)]
pub struct CallEvaluator {
    scorer: RuleScorer,
    orchestrator: HybridOverrideOrchestrator,
}

impl CallEvaluator {
    pub fn new(scorer: RuleScorer, orchestrator: HybridOverrideOrchestrator) -> Self {
        Self {
            scorer,
            orchestrator,
        }
    }

    /// Evaluator without an oracle
    pub fn rule_only() -> Self {
        Self::default()
    }

    /// Build from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        let scorer = RuleScorer::new(create_policy(settings.scoring.derived_policy));
        let oracle = create_oracle(&settings.oracle);
        let orchestrator = HybridOverrideOrchestrator::new(oracle)
            .with_prompts(PromptBundle::from_config(&settings.oracle))
            .with_timeout(settings.oracle.timeout());

        tracing::info!(
            policy = scorer.policy_name(),
            oracle = orchestrator.has_oracle(),
            "Call evaluator ready"
        );

        Self::new(scorer, orchestrator)
    }

    pub fn has_oracle(&self) -> bool {
        self.orchestrator.has_oracle()
    }

    /// Score one normalized call
    pub async fn evaluate(&self, call: &CallTranscript, mode: ScoringMode) -> CallEvaluation {
        if call.is_empty() || call.total_duration() < SHORT_CALL_SECS {
            tracing::info!(
                call_id = call.call_id(),
                segments = call.len(),
                duration = call.total_duration(),
                "Short call, skipping scoring"
            );
            return CallEvaluation::new(call.call_id(), short_call_results());
        }

        let base = self.scorer.score(call);
        let outcome = if mode.uses_oracle() {
            self.orchestrator.apply(call, mode, base).await
        } else {
            OverrideOutcome {
                results: base,
                oracle_calls: 0,
                overrides: 0,
            }
        };

        tracing::info!(
            call_id = call.call_id(),
            mode = %mode,
            oracle_calls = outcome.oracle_calls,
            overrides = outcome.overrides,
            "Call evaluated"
        );

        CallEvaluation::new(call.call_id(), outcome.results)
    }

    /// Normalize an untyped document and score it
    pub async fn evaluate_value(&self, payload: &Value, mode: ScoringMode) -> CallEvaluation {
        let call = CallTranscript::from_value(payload);
        self.evaluate(&call, mode).await
    }

    /// Parse a JSON document and score it
    pub async fn evaluate_json(&self, raw: &str, mode: ScoringMode) -> call_qc_core::Result<CallEvaluation> {
        let payload: Value = serde_json::from_str(raw)?;
        Ok(self.evaluate_value(&payload, mode).await)
    }
}

fn short_call_results() -> BTreeMap<Criterion, CriterionResult> {
    Criterion::ALL
        .into_iter()
        .map(|c| (c, CriterionResult::new(0, SHORT_CALL_REASONING, Probability::Low)))
        .collect()
}
