//! Scenario detectors
//!
//! Computed once per transcript and shared read-only by every criterion.

use call_qc_core::{CallTranscript, Segment};
use call_qc_text_processing::{contains_pii, extract_silence_seconds, has_silence_marker};

use crate::evidence::first_operator_with;
use crate::markers::Marker;

/// Annotated silence at or above this many seconds counts as a long hold
pub const LONG_SILENCE_SECS: u32 = 90;

/// Scenario checked by a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    InternalLeak,
    PiiMishandling,
    CallbackFailure,
}

/// Detector verdict with the segment that supports it
///
/// A detector can point at a segment without firing: PII mishandling
/// reports the protecting statement when the operator did the right thing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Detection<'a> {
    pub triggered: bool,
    pub segment: Option<&'a Segment>,
}

impl<'a> Detection<'a> {
    pub fn triggered(segment: Option<&'a Segment>) -> Self {
        Self {
            triggered: true,
            segment,
        }
    }

    pub fn cleared(segment: Option<&'a Segment>) -> Self {
        Self {
            triggered: false,
            segment,
        }
    }
}

/// Flags for one transcript
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScenarioFlags<'a> {
    pub internal_leak: Option<&'a Segment>,
    pub pii_mishandled: Detection<'a>,
    pub callback_failure: Detection<'a>,
}

impl<'a> ScenarioFlags<'a> {
    /// Run all three detectors
    pub fn detect(call: &'a CallTranscript) -> Self {
        let segments = call.segments();
        let flags = Self {
            internal_leak: detect_internal_leak(segments),
            pii_mishandled: detect_pii_mishandling(segments),
            callback_failure: detect_callback_failure(segments),
        };

        tracing::debug!(
            call_id = call.call_id(),
            internal_leak = flags.internal_leak.is_some(),
            pii_mishandled = flags.pii_mishandled.triggered,
            callback_failure = flags.callback_failure.triggered,
            "Scenario detection complete"
        );

        flags
    }

    pub fn is_set(&self, scenario: Scenario) -> bool {
        match scenario {
            Scenario::InternalLeak => self.internal_leak.is_some(),
            Scenario::PiiMishandling => self.pii_mishandled.triggered,
            Scenario::CallbackFailure => self.callback_failure.triggered,
        }
    }

    /// Supporting segment of a scenario that fired
    pub fn evidence(&self, scenario: Scenario) -> Option<&'a Segment> {
        match scenario {
            Scenario::InternalLeak => self.internal_leak,
            Scenario::PiiMishandling if self.pii_mishandled.triggered => self.pii_mishandled.segment,
            Scenario::CallbackFailure if self.callback_failure.triggered => self.callback_failure.segment,
            _ => None,
        }
    }

    pub fn any(&self) -> bool {
        self.internal_leak.is_some() || self.pii_mishandled.triggered || self.callback_failure.triggered
    }
}

/// First operator segment disclosing internal problems
pub fn detect_internal_leak(segments: &[Segment]) -> Option<&Segment> {
    first_operator_with(segments, Marker::InternalLeak)
}

/// Sensitive data from the customer handled without protection
pub fn detect_pii_mishandling(segments: &[Segment]) -> Detection<'_> {
    let first_pii = segments
        .iter()
        .find(|s| s.is_customer() && contains_pii(&s.text));
    if first_pii.is_none() {
        return Detection::default();
    }

    if let Some(protects) = first_operator_with(segments, Marker::PiiProtection) {
        return Detection::cleared(Some(protects));
    }
    if let Some(asks_cvv) = first_operator_with(segments, Marker::CvvMention) {
        return Detection::triggered(Some(asks_cvv));
    }
    if let Some(proceeds) = first_operator_with(segments, Marker::PaymentCompleted) {
        return Detection::triggered(Some(proceeds));
    }

    // no protection, no request, no completion: still unsafe
    Detection::triggered(first_pii)
}

/// Operator refusing a callback around an annotated silence
pub fn detect_callback_failure(segments: &[Segment]) -> Detection<'_> {
    let Some(refusal) = first_operator_with(segments, Marker::CallbackRefusal) else {
        return Detection::default();
    };

    let long_silence = segments
        .iter()
        .filter_map(|s| extract_silence_seconds(&s.text))
        .any(|secs| secs >= LONG_SILENCE_SECS);
    let any_silence = long_silence || segments.iter().any(|s| has_silence_marker(&s.text));

    if any_silence {
        tracing::debug!(long_hold = long_silence, "Callback refusal after annotated silence");
        Detection::triggered(Some(refusal))
    } else {
        Detection::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(segments: Vec<Segment>) -> CallTranscript {
        CallTranscript::new("T", segments)
    }

    #[test]
    fn test_internal_leak_operator_only() {
        let c = call(vec![
            Segment::new("Customer", "Şirkət heç nə etmir", 0.0, 2.0),
            Segment::new("Operator", "Salam, buyurun", 2.0, 4.0),
        ]);
        assert!(ScenarioFlags::detect(&c).internal_leak.is_none());

        let c = call(vec![Segment::new("Operator", "Rəhbərlik investisiya etmir", 0.0, 2.0)]);
        let flags = ScenarioFlags::detect(&c);
        assert_eq!(flags.internal_leak.map(|s| s.start), Some(0.0));
        assert!(flags.is_set(Scenario::InternalLeak));
    }

    #[test]
    fn test_pii_requires_customer_data() {
        let c = call(vec![Segment::new("Operator", "CVV kodunu deyin", 0.0, 2.0)]);
        assert!(!ScenarioFlags::detect(&c).pii_mishandled.triggered);
    }

    #[test]
    fn test_pii_cvv_request() {
        let c = call(vec![
            Segment::new("Customer", "Kart nömrəm 4111 1111 1111 1111", 0.0, 2.0),
            Segment::new("Operator", "CVV-ni də deyin", 2.0, 4.0),
        ]);
        let d = ScenarioFlags::detect(&c).pii_mishandled;
        assert!(d.triggered);
        assert_eq!(d.segment.map(|s| s.speaker.as_str()), Some("Operator"));
    }

    #[test]
    fn test_pii_protected() {
        let c = call(vec![
            Segment::new("Customer", "Kart nömrəm 4111 1111 1111 1111", 0.0, 2.0),
            Segment::new("Operator", "Kart nömrənizi telefonda heç vaxt deməyin", 2.0, 4.0),
            Segment::new("Operator", "CVV lazım deyil", 4.0, 5.0),
        ]);
        let flags = ScenarioFlags::detect(&c);
        assert!(!flags.pii_mishandled.triggered);
        assert!(flags.pii_mishandled.segment.is_some());
        assert!(flags.evidence(Scenario::PiiMishandling).is_none());
    }

    #[test]
    fn test_pii_default_is_mishandled() {
        let c = call(vec![
            Segment::new("Operator", "Salam", 0.0, 1.0),
            Segment::new("Customer", "FIN kodum 5ZK8P2M", 1.0, 3.0),
        ]);
        let d = ScenarioFlags::detect(&c).pii_mishandled;
        assert!(d.triggered);
        assert_eq!(d.segment.map(|s| s.speaker.as_str()), Some("Customer"));
    }

    #[test]
    fn test_pii_payment_completed_without_protection() {
        let c = call(vec![
            Segment::new("Customer", "Kart nömrəm 4111 1111 1111 1111", 0.0, 2.0),
            Segment::new("Operator", "Yaxşı, gözləyin.", 2.0, 4.0),
            Segment::new("Operator", "Ödəniş edildi, təşəkkürlər.", 4.0, 6.0),
        ]);
        let d = ScenarioFlags::detect(&c).pii_mishandled;
        assert!(d.triggered);
        assert_eq!(d.segment.map(|s| s.text.as_str()), Some("Ödəniş edildi, təşəkkürlər."));
    }

    #[test]
    fn test_callback_failure_long_silence() {
        let c = call(vec![
            Segment::new("Customer", "[140 saniyə süküt]", 0.0, 140.0),
            Segment::new("Operator", "Мы не перезваниваем, завтра снова позвоните.", 140.0, 145.0),
        ]);
        let d = ScenarioFlags::detect(&c).callback_failure;
        assert!(d.triggered);
        assert_eq!(d.segment.map(|s| s.start), Some(140.0));
    }

    #[test]
    fn test_callback_failure_short_silence_still_counts() {
        let c = call(vec![
            Segment::new("Operator", "[10 saniyə süküt]", 0.0, 10.0),
            Segment::new("Operator", "Geri zəng yoxdur", 10.0, 12.0),
        ]);
        assert!(ScenarioFlags::detect(&c).callback_failure.triggered);
    }

    #[test]
    fn test_refusal_without_silence_is_not_failure() {
        let c = call(vec![Segment::new("Operator", "Geri zəng yoxdur", 0.0, 2.0)]);
        let flags = ScenarioFlags::detect(&c);
        assert!(!flags.callback_failure.triggered);
        assert!(!flags.any());
    }
}
