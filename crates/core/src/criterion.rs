//! Criterion codes, confidence tiers and per-criterion results

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Highest score a criterion can receive
pub const MAX_SCORE: u8 = 3;

/// The five fixed quality criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criterion {
    /// Operator takes ownership of the customer's issue
    #[serde(rename = "KR2.1")]
    Ownership,
    /// Operator understands and clarifies the customer's need
    #[serde(rename = "KR2.2")]
    Understanding,
    /// A concrete resolution is offered
    #[serde(rename = "KR2.3")]
    Resolution,
    /// The request is registered and next steps are stated
    #[serde(rename = "KR2.4")]
    ProcessNextSteps,
    /// Etiquette, tone and brand protection
    #[serde(rename = "KR2.5")]
    Professionalism,
}

impl Criterion {
    /// All criteria in output order
    pub const ALL: [Criterion; 5] = [
        Criterion::Ownership,
        Criterion::Understanding,
        Criterion::Resolution,
        Criterion::ProcessNextSteps,
        Criterion::Professionalism,
    ];

    /// Criterion code as used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Criterion::Ownership => "KR2.1",
            Criterion::Understanding => "KR2.2",
            Criterion::Resolution => "KR2.3",
            Criterion::ProcessNextSteps => "KR2.4",
            Criterion::Professionalism => "KR2.5",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Coarse confidence label; LOW gates oracle escalation in hybrid mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Probability {
    High,
    Medium,
    Low,
}

impl Probability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probability::High => "HIGH",
            Probability::Medium => "MEDIUM",
            Probability::Low => "LOW",
        }
    }

    /// Parse a label leniently (case and surrounding whitespace ignored)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "HIGH" => Some(Probability::High),
            "MEDIUM" => Some(Probability::Medium),
            "LOW" => Some(Probability::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for a single criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Discrete score 0..=3
    pub score: u8,
    /// Short justification
    pub reasoning: String,
    /// Confidence tier
    pub probability: Probability,
    /// Masked verbatim excerpt supporting the score
    #[serde(
        rename = "evidence_snippet",
        default,
        skip_serializing_if = "evidence_is_blank"
    )]
    pub evidence: Option<String>,
}

fn evidence_is_blank(evidence: &Option<String>) -> bool {
    evidence.as_deref().map_or(true, |e| e.trim().is_empty())
}

impl CriterionResult {
    /// Create a result without evidence; scores above 3 are capped
    pub fn new(score: u8, reasoning: impl Into<String>, probability: Probability) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            reasoning: reasoning.into(),
            probability,
            evidence: None,
        }
    }

    /// Attach evidence; blank evidence is dropped
    pub fn with_evidence(mut self, evidence: Option<String>) -> Self {
        self.evidence = evidence.filter(|e| !e.trim().is_empty());
        self
    }

    /// Does this result carry usable evidence?
    pub fn has_evidence(&self) -> bool {
        !evidence_is_blank(&self.evidence)
    }
}

/// Final five-criterion result set for one call
#[derive(Debug, Clone, PartialEq)]
pub struct CallEvaluation {
    pub call_id: String,
    pub results: BTreeMap<Criterion, CriterionResult>,
}

impl CallEvaluation {
    pub fn new(call_id: impl Into<String>, results: BTreeMap<Criterion, CriterionResult>) -> Self {
        Self {
            call_id: call_id.into(),
            results,
        }
    }

    /// Result for one criterion
    pub fn get(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.results.get(&criterion)
    }

    /// Output document `{ call_id: { "KR2.1": {...}, ... } }`
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for CallEvaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.call_id, &self.results)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_codes() {
        assert_eq!(Criterion::Ownership.code(), "KR2.1");
        assert_eq!(Criterion::ALL.len(), 5);
    }

    #[test]
    fn test_probability_labels() {
        assert_eq!(Probability::from_label(" medium "), Some(Probability::Medium));
        assert_eq!(Probability::from_label("certain"), None);
        assert_eq!(serde_json::to_string(&Probability::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_score_is_capped() {
        let result = CriterionResult::new(7, "too high", Probability::High);
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_blank_evidence_is_dropped() {
        let result = CriterionResult::new(2, "ok", Probability::Medium)
            .with_evidence(Some("   ".to_string()));
        assert!(result.evidence.is_none());
        assert!(!result.has_evidence());
    }

    #[test]
    fn test_evidence_snippet_only_when_present() {
        let without = CriterionResult::new(3, "fine", Probability::Low);
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("evidence_snippet").is_none());
        assert_eq!(value["probability"], "LOW");

        let with = without.with_evidence(Some("[0.0-1.0] Operator: Salam".to_string()));
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(value["evidence_snippet"], "[0.0-1.0] Operator: Salam");
    }

    #[test]
    fn test_document_shape() {
        let mut results = BTreeMap::new();
        for criterion in Criterion::ALL {
            results.insert(criterion, CriterionResult::new(1, "r", Probability::High));
        }
        let evaluation = CallEvaluation::new("C1", results);
        let doc = evaluation.to_document();

        let inner = doc["C1"].as_object().unwrap();
        let keys: Vec<&String> = inner.keys().collect();
        assert_eq!(keys, vec!["KR2.1", "KR2.2", "KR2.3", "KR2.4", "KR2.5"]);
        assert_eq!(inner["KR2.3"]["score"], 1);
    }
}
