//! Evidence snippet formatting and segment lookup

use call_qc_core::Segment;
use call_qc_text_processing::EvidenceRedactor;

use crate::markers::Marker;

/// `[start-end] speaker: masked_text` with one-decimal times
pub fn format_evidence(segment: &Segment, redactor: &EvidenceRedactor) -> String {
    format!(
        "[{:.1}-{:.1}] {}: {}",
        segment.start,
        segment.end,
        segment.speaker,
        redactor.mask(&segment.text)
    )
}

/// First operator segment containing the marker
pub fn first_operator_with<'a>(segments: &'a [Segment], marker: Marker) -> Option<&'a Segment> {
    segments
        .iter()
        .find(|s| s.is_operator() && marker.matches(&s.text))
}

/// First segment from any speaker containing the marker
pub fn first_with<'a>(segments: &'a [Segment], marker: Marker) -> Option<&'a Segment> {
    segments.iter().find(|s| marker.matches(&s.text))
}

pub fn first_operator(segments: &[Segment]) -> Option<&Segment> {
    segments.iter().find(|s| s.is_operator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_evidence_masks_and_rounds() {
        let seg = Segment::new("Customer", "Kart nömrəm 4111 1111 1111 1111", 3.0, 7.26);
        let ev = format_evidence(&seg, &EvidenceRedactor::new());
        assert_eq!(ev, "[3.0-7.3] Customer: Kart nömrəm **** **** **** 1111");
    }

    #[test]
    fn test_lookup_helpers() {
        let segs = vec![
            Segment::new("Customer", "Ticket açın", 0.0, 1.0),
            Segment::new("Operator", "Salam", 1.0, 2.0),
            Segment::new("Operator", "Ticket açdım", 2.0, 3.0),
        ];
        assert_eq!(first_operator(&segs).map(|s| s.text.as_str()), Some("Salam"));
        assert_eq!(
            first_operator_with(&segs, Marker::TicketOrNote).map(|s| s.text.as_str()),
            Some("Ticket açdım")
        );
        assert_eq!(
            first_with(&segs, Marker::TicketOrNote).map(|s| s.text.as_str()),
            Some("Ticket açın")
        );
    }
}
