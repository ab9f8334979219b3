//! Best-effort parsing of oracle replies
//!
//! Models wrap JSON in code fences or surround it with prose. Extraction runs
//! three stages, each falling through to the next:
//! 1. parse the whole reply
//! 2. strip a code fence (with an optional `json` label) and parse
//! 3. parse the first balanced `{...}` span

use call_qc_core::criterion::MAX_SCORE;
use call_qc_core::Probability;
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder when the oracle leaves reasoning blank
pub const EMPTY_REASONING: &str = "Oracle gave no reasoning.";

/// Why a reply could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("no JSON object in oracle reply")]
    NoObject,

    #[error("oracle score {0} outside 0..=3")]
    ScoreOutOfRange(i64),
}

/// Fields pulled from an oracle reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleReply {
    pub score: u8,
    pub reasoning: String,
    /// Empty when the oracle quoted nothing
    pub evidence: String,
    pub probability: Probability,
}

impl OracleReply {
    /// Extract and coerce the reply fields
    ///
    /// A missing or non-integer score becomes 0; an unknown probability
    /// becomes LOW.
    pub fn parse(raw: &str) -> Result<Self, ReplyError> {
        let object = extract_json_object(raw).ok_or(ReplyError::NoObject)?;

        let score = coerce_score(object.get("score"));
        if !(0..=i64::from(MAX_SCORE)).contains(&score) {
            return Err(ReplyError::ScoreOutOfRange(score));
        }

        let reasoning = text_field(object.get("reasoning"));
        let reasoning = if reasoning.is_empty() {
            EMPTY_REASONING.to_string()
        } else {
            reasoning
        };

        let probability = object
            .get("probability")
            .and_then(Value::as_str)
            .and_then(Probability::from_label)
            .unwrap_or(Probability::Low);

        Ok(Self {
            score: score as u8,
            reasoning,
            evidence: text_field(object.get("evidence")),
            probability,
        })
    }
}

/// First JSON object recoverable from the text
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    parse_object(text)
        .or_else(|| strip_code_fence(text).and_then(parse_object))
        .or_else(|| first_balanced_object(text).and_then(parse_object))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Body of a fenced block, e.g. "```json\n{...}\n```"
fn strip_code_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```")?;
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body).trim_start();

    let body = match body.get(..4) {
        Some(label) if label.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    };
    Some(body.trim())
}

/// First `{...}` span with balanced braces, ignoring braces inside strings
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn coerce_score(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
