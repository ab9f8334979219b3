//! Hybrid override orchestration
//!
//! Decides per mode which criteria go to the oracle, calls it concurrently,
//! and keeps an oracle result only when it passes validation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use call_qc_core::{
    CallTranscript, Criterion, CriterionResult, Oracle, OracleError, Probability, ScoringMode,
};
use call_qc_llm::{OracleReply, PromptBundle};
use call_qc_text_processing::EvidenceRedactor;
use futures::future::join_all;

use crate::validator::{AntiHallucinationValidator, Candidate};

/// Default per-call oracle timeout
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of the override stage
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideOutcome {
    pub results: BTreeMap<Criterion, CriterionResult>,
    pub oracle_calls: usize,
    pub overrides: usize,
}

/// Routes low-confidence criteria to an oracle
#[derive(Clone)]
pub struct HybridOverrideOrchestrator {
    oracle: Option<Arc<dyn Oracle>>,
    prompts: PromptBundle,
    timeout: Duration,
    redactor: EvidenceRedactor,
}

impl HybridOverrideOrchestrator {
    pub fn new(oracle: Option<Arc<dyn Oracle>>) -> Self {
        Self {
            oracle,
            prompts: PromptBundle::default(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
            redactor: EvidenceRedactor::new(),
        }
    }

    /// Orchestrator that never calls out
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn with_prompts(mut self, prompts: PromptBundle) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Criteria the mode sends to the oracle
    pub fn eligible(mode: ScoringMode, base: &BTreeMap<Criterion, CriterionResult>) -> Vec<Criterion> {
        match mode {
            ScoringMode::Rule => Vec::new(),
            ScoringMode::Hybrid => base
                .iter()
                .filter(|(_, r)| r.probability == Probability::Low || !r.has_evidence())
                .map(|(c, _)| *c)
                .collect(),
            ScoringMode::Llm => base.keys().copied().collect(),
        }
    }

    /// `speaker: masked_text` per segment, newline separated
    pub fn render_transcript(&self, call: &CallTranscript) -> String {
        call.segments()
            .iter()
            .map(|s| format!("{}: {}", s.speaker, self.redactor.mask(&s.text)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply oracle overrides to the rule results
    pub async fn apply(
        &self,
        call: &CallTranscript,
        mode: ScoringMode,
        base: BTreeMap<Criterion, CriterionResult>,
    ) -> OverrideOutcome {
        let Some(oracle) = self.oracle.as_ref() else {
            return OverrideOutcome {
                results: base,
                oracle_calls: 0,
                overrides: 0,
            };
        };

        let eligible = Self::eligible(mode, &base);
        if eligible.is_empty() {
            return OverrideOutcome {
                results: base,
                oracle_calls: 0,
                overrides: 0,
            };
        }

        let transcript = self.render_transcript(call);
        let validator = AntiHallucinationValidator::new(&transcript);

        let consults = eligible
            .iter()
            .map(|criterion| self.consult(oracle.as_ref(), *criterion, &transcript));
        let candidates = join_all(consults).await;

        let mut results = base;
        let mut overrides = 0;
        for (criterion, candidate) in eligible.iter().zip(candidates) {
            match validator.check(&candidate) {
                Ok(()) => {
                    tracing::debug!(
                        call_id = call.call_id(),
                        criterion = criterion.code(),
                        score = candidate.result.score,
                        "Oracle override accepted"
                    );
                    results.insert(*criterion, candidate.result);
                    overrides += 1;
                }
                Err(rejection) => {
                    tracing::warn!(
                        call_id = call.call_id(),
                        criterion = criterion.code(),
                        "Oracle override rejected: {}",
                        rejection
                    );
                }
            }
        }

        OverrideOutcome {
            results,
            oracle_calls: eligible.len(),
            overrides,
        }
    }

    /// One oracle round trip for one criterion
    async fn consult(&self, oracle: &dyn Oracle, criterion: Criterion, transcript: &str) -> Candidate {
        let user = self.prompts.render_user(criterion.code(), transcript);

        let raw = match tokio::time::timeout(self.timeout, oracle.complete(&self.prompts.system, &user)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => return self.transport_failure(oracle, criterion, e),
            Err(_) => {
                let e = OracleError::Timeout(self.timeout.as_millis() as u64);
                return self.transport_failure(oracle, criterion, e);
            }
        };

        let reply = match OracleReply::parse(&raw) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(oracle = oracle.name(), criterion = criterion.code(), "Unusable oracle reply: {}", e);
                return Candidate::fallback("oracle reply could not be parsed");
            }
        };

        let evidence = Some(self.redactor.mask(&reply.evidence));
        let result = CriterionResult::new(reply.score, self.redactor.mask(&reply.reasoning), reply.probability)
            .with_evidence(evidence);
        Candidate::accepted(result)
    }

    fn transport_failure(&self, oracle: &dyn Oracle, criterion: Criterion, error: OracleError) -> Candidate {
        tracing::warn!(oracle = oracle.name(), criterion = criterion.code(), "Oracle call failed: {}", error);
        Candidate::fallback("oracle transport failure")
    }
}

impl Default for HybridOverrideOrchestrator {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for HybridOverrideOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridOverrideOrchestrator")
            .field("oracle", &self.oracle.as_ref().map(|o| o.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
