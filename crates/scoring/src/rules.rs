//! Ordered rule tables
//!
//! Each criterion is scored by walking its table top to bottom; the first
//! rule whose condition holds produces the result. Tables end with an
//! `Always` rule so every walk terminates with a result.

use call_qc_core::{CallTranscript, Criterion, CriterionResult, Probability, Segment};
use call_qc_text_processing::EvidenceRedactor;

use crate::detectors::{Scenario, ScenarioFlags};
use crate::evidence::{first_operator, first_operator_with, first_with, format_evidence};
use crate::markers::Marker;

/// When a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// A scenario detector fired
    Flag(Scenario),
    /// A scenario fired and an operator segment carries the marker
    FlagAndMarker(Scenario, Marker),
    /// Some operator segment carries the marker
    Marker(Marker),
    /// The ownership criterion scored exactly this value
    OwnershipScore(u8),
}

/// How the rule sets its probability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Fixed(Probability),
    /// Depends on whether an evidence selector found a segment
    IfEvidence {
        found: Probability,
        missing: Probability,
    },
    /// Copied from the ownership result
    Inherited,
}

/// Where evidence comes from; selectors are tried in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceSelector {
    /// Segment reported by a fired detector
    Detector(Scenario),
    /// First operator segment with the marker
    Operator(Marker),
    /// First segment from anyone with the marker
    AnySegment(Marker),
    FirstOperator,
    /// Evidence of the ownership result
    Ownership,
}

/// One row of a criterion table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub when: Condition,
    pub score: u8,
    pub confidence: Confidence,
    pub reasoning: &'static str,
    pub evidence: &'static [EvidenceSelector],
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub call: &'a CallTranscript,
    pub flags: &'a ScenarioFlags<'a>,
    /// Set once the ownership criterion is scored
    pub ownership: Option<&'a CriterionResult>,
    pub redactor: &'a EvidenceRedactor,
}

impl<'a> RuleContext<'a> {
    fn segments(&self) -> &'a [Segment] {
        self.call.segments()
    }
}

impl Rule {
    pub fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        match self.when {
            Condition::Always => true,
            Condition::Flag(scenario) => ctx.flags.is_set(scenario),
            Condition::FlagAndMarker(scenario, marker) => {
                ctx.flags.is_set(scenario) && first_operator_with(ctx.segments(), marker).is_some()
            }
            Condition::Marker(marker) => first_operator_with(ctx.segments(), marker).is_some(),
            Condition::OwnershipScore(score) => ctx.ownership.is_some_and(|o| o.score == score),
        }
    }

    /// Build the result for a rule whose condition holds
    pub fn apply(&self, ctx: &RuleContext<'_>) -> CriterionResult {
        let evidence = self.select_evidence(ctx);
        let probability = match self.confidence {
            Confidence::Fixed(p) => p,
            Confidence::IfEvidence { found, missing } => {
                if evidence.is_some() {
                    found
                } else {
                    missing
                }
            }
            Confidence::Inherited => ctx.ownership.map_or(Probability::Low, |o| o.probability),
        };

        CriterionResult::new(self.score, self.reasoning, probability).with_evidence(evidence)
    }

    fn select_evidence(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let segments = ctx.segments();
        self.evidence.iter().find_map(|selector| {
            let segment = match *selector {
                EvidenceSelector::Detector(scenario) => ctx.flags.evidence(scenario),
                EvidenceSelector::Operator(marker) => first_operator_with(segments, marker),
                EvidenceSelector::AnySegment(marker) => first_with(segments, marker),
                EvidenceSelector::FirstOperator => first_operator(segments),
                EvidenceSelector::Ownership => {
                    return ctx
                        .ownership
                        .and_then(|o| o.evidence.clone())
                        .filter(|e| !e.trim().is_empty());
                }
            };
            segment.map(|s| format_evidence(s, ctx.redactor))
        })
    }
}

/// Walk a table and return the first matching rule's result
pub fn evaluate(criterion: Criterion, rules: &[Rule], ctx: &RuleContext<'_>) -> CriterionResult {
    match rules.iter().find(|rule| rule.applies(ctx)) {
        Some(rule) => {
            let result = rule.apply(ctx);
            tracing::debug!(
                call_id = ctx.call.call_id(),
                criterion = criterion.code(),
                rule = rule.name,
                score = result.score,
                probability = result.probability.as_str(),
                "Rule matched"
            );
            result
        }
        None => {
            tracing::warn!(criterion = criterion.code(), "No rule matched, scoring 0");
            CriterionResult::new(0, "No applicable rule.", Probability::Low)
        }
    }
}
