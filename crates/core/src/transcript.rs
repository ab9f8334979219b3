//! Transcript types and input normalization
//!
//! Raw input documents come from speech-to-text exports of varying quality.
//! Normalization never fails: malformed parts are skipped or zeroed and the
//! worst case is a transcript with no segments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Call id used when the input carries none
pub const UNKNOWN_CALL_ID: &str = "UNKNOWN_CALL";

/// Speaker label used when a segment carries none
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// Who is talking in a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeakerRole {
    Operator,
    Customer,
    Other,
}

impl SpeakerRole {
    /// Classify a free-form speaker label
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.starts_with("oper") || label.starts_with("agent") {
            SpeakerRole::Operator
        } else if label.starts_with("cust")
            || label.starts_with("client")
            || label.starts_with("müştəri")
        {
            SpeakerRole::Customer
        } else {
            SpeakerRole::Other
        }
    }
}

/// One utterance with its time span in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub speaker: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    /// Create a segment; a reversed time span is swapped
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, start: f64, end: f64) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            speaker: speaker.into(),
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn role(&self) -> SpeakerRole {
        SpeakerRole::from_label(&self.speaker)
    }

    pub fn is_operator(&self) -> bool {
        self.role() == SpeakerRole::Operator
    }

    pub fn is_customer(&self) -> bool {
        self.role() == SpeakerRole::Customer
    }
}

/// Canonical, time-ordered transcript of one call
#[derive(Debug, Clone, PartialEq)]
pub struct CallTranscript {
    call_id: String,
    segments: Vec<Segment>,
}

impl CallTranscript {
    /// Build a transcript; segments are ordered by `(start, end)`
    pub fn new(call_id: impl Into<String>, mut segments: Vec<Segment>) -> Self {
        segments.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)));
        Self {
            call_id: call_id.into(),
            segments,
        }
    }

    /// Transcript without segments
    pub fn empty(call_id: impl Into<String>) -> Self {
        Self::new(call_id, Vec::new())
    }

    /// Normalize an untyped input document
    ///
    /// Accepts `start`/`end` or `start_time`/`end_time`. Entries that are not
    /// objects are skipped; missing or non-numeric times become `0.0`.
    pub fn from_value(payload: &Value) -> Self {
        let call_id = payload
            .get("call_id")
            .and_then(scalar_to_string)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNKNOWN_CALL_ID.to_string());

        let raw_segments = match payload.get("segments") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(other) => {
                tracing::warn!(call_id = %call_id, kind = value_kind(other), "segments is not a list, treating as empty");
                &[]
            }
            None => &[],
        };

        let mut segments = Vec::with_capacity(raw_segments.len());
        for (index, item) in raw_segments.iter().enumerate() {
            match item {
                Value::Object(fields) => segments.push(parse_segment(&call_id, index, fields)),
                other => {
                    tracing::warn!(call_id = %call_id, index, kind = value_kind(other), "skipping segment that is not an object");
                }
            }
        }

        Self::new(call_id, segments)
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `max(end) - min(start)` over all segments, 0 when empty
    pub fn total_duration(&self) -> f64 {
        let start = self.segments.iter().map(|s| s.start).reduce(f64::min);
        let end = self.segments.iter().map(|s| s.end).reduce(f64::max);
        match (start, end) {
            (Some(start), Some(end)) => (end - start).max(0.0),
            _ => 0.0,
        }
    }
}

fn parse_segment(call_id: &str, index: usize, fields: &Map<String, Value>) -> Segment {
    let speaker = fields
        .get("speaker")
        .and_then(scalar_to_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
    let text = fields
        .get("text")
        .and_then(scalar_to_string)
        .unwrap_or_default();

    let start = time_field(fields, "start", "start_time");
    let end = time_field(fields, "end", "end_time");
    if end < start {
        tracing::warn!(call_id, index, start, end, "segment end precedes start, swapping");
    }

    Segment::new(speaker, text, start, end)
}

/// First present key wins; anything non-numeric becomes 0.0
fn time_field(fields: &Map<String, Value>, key: &str, alias: &str) -> f64 {
    let raw = fields
        .get(key)
        .filter(|v| !v.is_null())
        .or_else(|| fields.get(alias));

    raw.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|t| t.is_finite())
    .unwrap_or(0.0)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
