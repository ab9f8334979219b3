//! Regex patterns for payment and identity data

use once_cell::sync::Lazy;
use regex::Regex;

/// 13-19 digits, optionally grouped with spaces or dashes
pub(crate) static CARD_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d[ -]*?){13,19}\b").unwrap());

/// Contiguous digit runs the grouped pattern cannot anchor (20+ digits)
pub(crate) static LONG_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{13,}").unwrap());

pub(crate) static CVV_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:cvv2?|cvc2?)\b").unwrap());

pub(crate) static THREE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3}\b").unwrap());

static FIN_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bFIN\b").unwrap());

/// FIN codes are 7 uppercase alphanumerics; checked for mixed letters/digits below
static FIN_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z0-9]{7}\b").unwrap());

/// Bracketed silence annotations, e.g. `[140 saniyə süküt]`, `[95 seconds silence]`, `[120 секунд тишины]`
static SILENCE_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\[(\d+)\s*saniyə(?:\s+[^\]]+)?\s*s[üu]k[üu]t[^\]]*\]",
        r"(?i)\[(\d+)\s*(?:s|sec|secs|second|seconds)\b[^\]]*silence[^\]]*\]",
        r"(?i)\[(\d+)\s*сек[а-яё]*[^\]]*тишин[^\]]*\]",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn contains_card_number(text: &str) -> bool {
    CARD_NUMBER.is_match(text)
}

pub fn contains_cvv(text: &str) -> bool {
    CVV_MENTION.is_match(text)
}

/// A `FIN` mention or a 7-character code mixing uppercase letters and digits
pub fn contains_national_id(text: &str) -> bool {
    if FIN_MENTION.is_match(text) {
        return true;
    }
    FIN_CODE.find_iter(text).any(|m| {
        let code = m.as_str();
        code.bytes().any(|b| b.is_ascii_digit()) && code.bytes().any(|b| b.is_ascii_uppercase())
    })
}

/// Card number or national ID
pub fn contains_pii(text: &str) -> bool {
    contains_card_number(text) || contains_national_id(text)
}

/// Longest silence annotated in the text, in seconds
pub fn extract_silence_seconds(text: &str) -> Option<u32> {
    SILENCE_MARKERS
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

pub fn has_silence_marker(text: &str) -> bool {
    SILENCE_MARKERS.iter().any(|re| re.is_match(text))
}
