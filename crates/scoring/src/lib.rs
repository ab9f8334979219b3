//! Deterministic scoring for call transcripts
//!
//! Features:
//! - Three scenario detectors (internal leak, PII mishandling, callback failure)
//! - Ordered rule tables, one per criterion
//! - Swappable policy for criteria derived from the ownership result
//! - Masked, verbatim evidence snippets

pub mod correlation;
pub mod criteria;
pub mod detectors;
pub mod evidence;
pub mod markers;
pub mod rules;

use std::collections::BTreeMap;
use std::sync::Arc;

use call_qc_core::{CallTranscript, Criterion, CriterionResult};
use call_qc_text_processing::EvidenceRedactor;

pub use correlation::{create_policy, CorrelationPolicy, DerivedPolicy, Independent, OwnershipCorrelation};
pub use detectors::{Detection, Scenario, ScenarioFlags, LONG_SILENCE_SECS};
pub use evidence::format_evidence;
pub use markers::Marker;
pub use rules::{Condition, Confidence, EvidenceSelector, Rule, RuleContext};

/// Rule-based scorer for all five criteria
#[derive(Clone)]
pub struct RuleScorer {
    redactor: EvidenceRedactor,
    policy: Arc<dyn CorrelationPolicy>,
}

impl RuleScorer {
    pub fn new(policy: Arc<dyn CorrelationPolicy>) -> Self {
        Self {
            redactor: EvidenceRedactor::new(),
            policy,
        }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Detect scenarios and score every criterion
    pub fn score(&self, call: &CallTranscript) -> BTreeMap<Criterion, CriterionResult> {
        let flags = ScenarioFlags::detect(call);
        self.score_with_flags(call, &flags)
    }

    /// Score every criterion against precomputed flags
    ///
    /// Ownership goes first because derived tables read its result.
    pub fn score_with_flags(
        &self,
        call: &CallTranscript,
        flags: &ScenarioFlags<'_>,
    ) -> BTreeMap<Criterion, CriterionResult> {
        let mut ctx = RuleContext {
            call,
            flags,
            ownership: None,
            redactor: &self.redactor,
        };
        let ownership = rules::evaluate(
            Criterion::Ownership,
            self.policy.rules(Criterion::Ownership),
            &ctx,
        );
        ctx.ownership = Some(&ownership);

        let mut results = BTreeMap::new();
        for criterion in Criterion::ALL.into_iter().filter(|c| *c != Criterion::Ownership) {
            let result = rules::evaluate(criterion, self.policy.rules(criterion), &ctx);
            results.insert(criterion, result);
        }
        results.insert(Criterion::Ownership, ownership);
        results
    }
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new(Arc::new(OwnershipCorrelation))
    }
}

impl std::fmt::Debug for RuleScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleScorer")
            .field("policy", &self.policy.name())
            .finish()
    }
}
