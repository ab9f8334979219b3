//! Evidence masking
//!
//! Applied unconditionally to evidence snippets, oracle-bound transcript
//! text and oracle replies.

use regex::Captures;

use super::patterns::{CARD_NUMBER, CVV_MENTION, LONG_DIGIT_RUN, THREE_DIGITS};

const CARD_MASK_PREFIX: &str = "**** **** **** ";
const CVV_MASK: &str = "***";
const MIN_CARD_DIGITS: usize = 13;

/// Masks card numbers and CVV-adjacent digits
#[derive(Debug, Clone, Copy, Default)]
pub struct EvidenceRedactor;

impl EvidenceRedactor {
    pub fn new() -> Self {
        Self
    }

    /// Mask sensitive substrings
    ///
    /// Card-shaped digit runs keep only their last four digits. When the text
    /// mentions a CVV/CVC, every standalone 3-digit run becomes `***`.
    pub fn mask(&self, text: &str) -> String {
        let masked = CARD_NUMBER
            .replace_all(text, |caps: &Captures| mask_card(&caps[0]))
            .into_owned();
        let masked = LONG_DIGIT_RUN
            .replace_all(&masked, |caps: &Captures| mask_card(&caps[0]))
            .into_owned();

        if CVV_MENTION.is_match(text) {
            THREE_DIGITS.replace_all(&masked, CVV_MASK).into_owned()
        } else {
            masked
        }
    }
}

/// Digits are counted as the patterns see them: any Unicode decimal digit
fn mask_card(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_numeric()).collect();
    if digits.len() < MIN_CARD_DIGITS {
        return raw.to_string();
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", CARD_MASK_PREFIX, last4)
}
