//! Anti-hallucination guard for oracle overrides

use call_qc_core::CriterionResult;
use call_qc_text_processing::{contains_normalized, normalize_whitespace};
use thiserror::Error;

/// Prefix carried by every synthetic fallback reasoning
pub const FALLBACK_MARKER: &str = "[oracle-fallback]";

/// Oracle result waiting for validation
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub result: CriterionResult,
    /// Set for synthetic results produced on oracle failure
    pub fallback: bool,
}

impl Candidate {
    pub fn accepted(result: CriterionResult) -> Self {
        Self {
            result,
            fallback: false,
        }
    }

    /// Score 0, LOW, no evidence, tagged as fallback
    pub fn fallback(reason: &str) -> Self {
        Self {
            result: CriterionResult::new(
                0,
                format!("{} {}", FALLBACK_MARKER, reason),
                call_qc_core::Probability::Low,
            ),
            fallback: true,
        }
    }
}

/// Why a candidate may not replace a rule result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("synthetic fallback result")]
    Fallback,

    #[error("evidence not found in transcript")]
    EvidenceNotFound,
}

/// Checks oracle evidence against the masked transcript
#[derive(Debug, Clone)]
pub struct AntiHallucinationValidator {
    transcript: String,
}

impl AntiHallucinationValidator {
    pub fn new(masked_transcript: &str) -> Self {
        Self {
            transcript: normalize_whitespace(masked_transcript),
        }
    }

    pub fn check(&self, candidate: &Candidate) -> Result<(), Rejection> {
        if candidate.fallback || candidate.result.reasoning.contains(FALLBACK_MARKER) {
            return Err(Rejection::Fallback);
        }

        if let Some(evidence) = candidate.result.evidence.as_deref() {
            if !evidence.trim().is_empty() && !contains_normalized(&self.transcript, evidence) {
                return Err(Rejection::EvidenceNotFound);
            }
        }

        Ok(())
    }
}
