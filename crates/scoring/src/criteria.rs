//! Rule tables for the five criteria

use call_qc_core::{Criterion, Probability};

use crate::detectors::Scenario;
use crate::markers::Marker;
use crate::rules::{Condition, Confidence, EvidenceSelector, Rule};

use Probability::{High, Low, Medium};

const MARKER_CONFIDENCE: Confidence = Confidence::IfEvidence {
    found: High,
    missing: Low,
};

pub static OWNERSHIP: &[Rule] = &[
    Rule {
        name: "ownership.internal_leak",
        when: Condition::Flag(Scenario::InternalLeak),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator does not take ownership and deflects with internal complaints.",
        evidence: &[EvidenceSelector::Detector(Scenario::InternalLeak)],
    },
    Rule {
        name: "ownership.pii_mishandled",
        when: Condition::Flag(Scenario::PiiMishandling),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator asks for risky card data instead of moving the customer to a secure channel.",
        evidence: &[
            EvidenceSelector::Operator(Marker::CvvMention),
            EvidenceSelector::Operator(Marker::CardMention),
        ],
    },
    Rule {
        name: "ownership.callback_failure",
        when: Condition::Flag(Scenario::CallbackFailure),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator leaves the customer on hold and refuses a callback or alternative.",
        evidence: &[EvidenceSelector::Detector(Scenario::CallbackFailure)],
    },
    Rule {
        name: "ownership.default",
        when: Condition::Always,
        score: 3,
        confidence: MARKER_CONFIDENCE,
        reasoning: "Operator takes ownership and proposes an active step (fix, alternative, technician, ticket).",
        evidence: &[EvidenceSelector::Operator(Marker::Ownership)],
    },
];

pub static UNDERSTANDING: &[Rule] = &[
    Rule {
        name: "understanding.internal_leak",
        when: Condition::Flag(Scenario::InternalLeak),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator answers with internal complaints instead of understanding the problem.",
        evidence: &[EvidenceSelector::FirstOperator],
    },
    Rule {
        name: "understanding.callback_failure_checking",
        when: Condition::FlagAndMarker(Scenario::CallbackFailure, Marker::Checking),
        score: 2,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator partly acknowledges the problem but hold handling and communication are weak.",
        evidence: &[EvidenceSelector::Operator(Marker::Checking)],
    },
    Rule {
        name: "understanding.callback_failure",
        when: Condition::Flag(Scenario::CallbackFailure),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator asks the customer to wait without explaining; no active listening.",
        evidence: &[EvidenceSelector::FirstOperator],
    },
    Rule {
        name: "understanding.pii_clarifying",
        when: Condition::FlagAndMarker(Scenario::PiiMishandling, Marker::ClarifyingQuestion),
        score: 2,
        confidence: Confidence::Fixed(Medium),
        reasoning: "Operator gathers some relevant details but sensitive data is not handled safely.",
        evidence: &[EvidenceSelector::Operator(Marker::ClarifyingQuestion)],
    },
    Rule {
        name: "understanding.pii_mishandled",
        when: Condition::Flag(Scenario::PiiMishandling),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator does not clarify the context and does not switch to a secure process.",
        evidence: &[EvidenceSelector::FirstOperator],
    },
    Rule {
        name: "understanding.default",
        when: Condition::Always,
        score: 3,
        confidence: MARKER_CONFIDENCE,
        reasoning: "Operator understands the problem, asks relevant questions or responds with empathy.",
        evidence: &[EvidenceSelector::Operator(Marker::Understanding)],
    },
];

pub static RESOLUTION: &[Rule] = &[
    Rule {
        name: "resolution.internal_leak",
        when: Condition::Flag(Scenario::InternalLeak),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "No resolution is offered; the answer is not constructive.",
        evidence: &[EvidenceSelector::FirstOperator],
    },
    Rule {
        name: "resolution.callback_failure",
        when: Condition::Flag(Scenario::CallbackFailure),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "No resolution is offered; the call ends after a long hold without outcome.",
        evidence: &[
            EvidenceSelector::Detector(Scenario::CallbackFailure),
            EvidenceSelector::AnySegment(Marker::Silence),
        ],
    },
    Rule {
        name: "resolution.pii_mishandled",
        when: Condition::Flag(Scenario::PiiMishandling),
        score: 2,
        confidence: Confidence::IfEvidence {
            found: High,
            missing: Medium,
        },
        reasoning: "An outcome is reported but the insecure process lowers the quality of the resolution.",
        evidence: &[EvidenceSelector::Operator(Marker::PaymentCompleted)],
    },
    Rule {
        name: "resolution.default",
        when: Condition::Always,
        score: 3,
        confidence: MARKER_CONFIDENCE,
        reasoning: "Operator gives a practical, clear resolution (steps or correct information).",
        evidence: &[EvidenceSelector::Operator(Marker::Resolution)],
    },
];

pub static PROCESS_NEXT_STEPS: &[Rule] = &[
    Rule {
        name: "process.callback_failure",
        when: Condition::Flag(Scenario::CallbackFailure),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "No next steps are offered (registration, ticket, callback or transfer).",
        evidence: &[EvidenceSelector::Detector(Scenario::CallbackFailure)],
    },
    Rule {
        name: "process.internal_leak",
        when: Condition::Flag(Scenario::InternalLeak),
        score: 2,
        confidence: Confidence::Fixed(High),
        reasoning: "Some process steps exist but the overall handling is unprofessional.",
        evidence: &[
            EvidenceSelector::Operator(Marker::TicketOrNote),
            EvidenceSelector::Detector(Scenario::InternalLeak),
        ],
    },
    Rule {
        name: "process.pii_mishandled",
        when: Condition::Flag(Scenario::PiiMishandling),
        score: 2,
        confidence: Confidence::Fixed(Medium),
        reasoning: "Operator confirms the process but the secure handling of sensitive data is broken.",
        evidence: &[EvidenceSelector::Operator(Marker::ProcessConfirmation)],
    },
    Rule {
        name: "process.default",
        when: Condition::Always,
        score: 3,
        confidence: MARKER_CONFIDENCE,
        reasoning: "Operator states next steps and expectations clearly (registration, ticket, timeline, channel).",
        evidence: &[EvidenceSelector::Operator(Marker::NextSteps)],
    },
];

pub static PROFESSIONALISM: &[Rule] = &[
    Rule {
        name: "professionalism.internal_leak",
        when: Condition::Flag(Scenario::InternalLeak),
        score: 0,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator shares internal or negative company information; brand and ethics rules are broken.",
        evidence: &[EvidenceSelector::Detector(Scenario::InternalLeak)],
    },
    Rule {
        name: "professionalism.pii_mishandled",
        when: Condition::Flag(Scenario::PiiMishandling),
        score: 0,
        confidence: Confidence::Fixed(High),
        reasoning: "Card, FIN or CVV data was not handled safely; the operator should have stopped and redirected.",
        evidence: &[EvidenceSelector::Operator(Marker::SensitiveTopic)],
    },
    Rule {
        name: "professionalism.callback_failure",
        when: Condition::Flag(Scenario::CallbackFailure),
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Weak etiquette and a harsh tone (long hold and refused callback).",
        evidence: &[EvidenceSelector::FirstOperator],
    },
    Rule {
        name: "professionalism.default",
        when: Condition::Always,
        score: 3,
        confidence: MARKER_CONFIDENCE,
        reasoning: "Operator communicates politely and professionally; etiquette and brand are preserved.",
        evidence: &[EvidenceSelector::Operator(Marker::Etiquette)],
    },
];

/// Ladder for understanding when it follows the ownership result
pub static UNDERSTANDING_DERIVED: &[Rule] = &[
    Rule {
        name: "understanding.owned",
        when: Condition::OwnershipScore(3),
        score: 3,
        confidence: Confidence::Inherited,
        reasoning: "Operator shapes the customer's need correctly and works on the substance.",
        evidence: &[EvidenceSelector::Ownership],
    },
    Rule {
        name: "understanding.checking",
        when: Condition::Marker(Marker::Checking),
        score: 2,
        confidence: Confidence::Fixed(High),
        reasoning: "Operator clarifies or checks some details, but the need is not fully formed.",
        evidence: &[EvidenceSelector::Operator(Marker::Checking)],
    },
    Rule {
        name: "understanding.clarifying",
        when: Condition::Marker(Marker::ClarifyingQuestion),
        score: 2,
        confidence: Confidence::Fixed(Medium),
        reasoning: "Operator asks a clarifying question, but the need is not fully formed.",
        evidence: &[EvidenceSelector::Operator(Marker::ClarifyingQuestion)],
    },
    Rule {
        name: "understanding.weak",
        when: Condition::Always,
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "Need formation is weak or missing.",
        evidence: &[EvidenceSelector::Ownership, EvidenceSelector::FirstOperator],
    },
];

/// Ladder for process and next steps when it follows the ownership result
pub static PROCESS_NEXT_STEPS_DERIVED: &[Rule] = &[
    Rule {
        name: "process.owned",
        when: Condition::OwnershipScore(3),
        score: 3,
        confidence: Confidence::Inherited,
        reasoning: "Operator routes the problem to the right channel or takes a concrete step.",
        evidence: &[EvidenceSelector::Ownership],
    },
    Rule {
        name: "process.partial_registration",
        when: Condition::Marker(Marker::PartialRegistration),
        score: 2,
        confidence: Confidence::Fixed(High),
        reasoning: "Routing or registration is partial (ticket or payment acknowledged) but incomplete.",
        evidence: &[EvidenceSelector::Operator(Marker::PartialRegistration)],
    },
    Rule {
        name: "process.not_registered",
        when: Condition::Always,
        score: 1,
        confidence: Confidence::Fixed(High),
        reasoning: "The request is not registered or the customer is sent away.",
        evidence: &[
            EvidenceSelector::Operator(Marker::CallbackRefusal),
            EvidenceSelector::Ownership,
            EvidenceSelector::FirstOperator,
        ],
    },
];

/// Independent cascade for a criterion
pub fn table(criterion: Criterion) -> &'static [Rule] {
    match criterion {
        Criterion::Ownership => OWNERSHIP,
        Criterion::Understanding => UNDERSTANDING,
        Criterion::Resolution => RESOLUTION,
        Criterion::ProcessNextSteps => PROCESS_NEXT_STEPS,
        Criterion::Professionalism => PROFESSIONALISM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_end_with_always() {
        let all = [
            OWNERSHIP,
            UNDERSTANDING,
            RESOLUTION,
            PROCESS_NEXT_STEPS,
            PROFESSIONALISM,
            UNDERSTANDING_DERIVED,
            PROCESS_NEXT_STEPS_DERIVED,
        ];
        for rules in all {
            assert_eq!(rules.last().map(|r| r.when), Some(Condition::Always));
            assert!(rules.iter().all(|r| r.score <= 3));
        }
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = Criterion::ALL
            .iter()
            .flat_map(|c| table(*c).iter().map(|r| r.name))
            .chain(UNDERSTANDING_DERIVED.iter().map(|r| r.name))
            .chain(PROCESS_NEXT_STEPS_DERIVED.iter().map(|r| r.name))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
