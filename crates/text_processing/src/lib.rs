//! Text processing for call transcripts
//!
//! This crate provides:
//! - **PII patterns**: card numbers, CVV/CVC mentions, national ID (FIN) tokens
//! - **Silence markers**: bracketed silence annotations in Azerbaijani, English and Russian
//! - **Evidence redaction**: masking applied to anything surfaced or sent to an oracle
//! - **Whitespace normalization** used when comparing evidence with transcript text

pub mod normalize;
pub mod pii;

pub use normalize::{contains_normalized, normalize_whitespace};
pub use pii::{
    contains_card_number, contains_cvv, contains_national_id, contains_pii, extract_silence_seconds,
    has_silence_marker, EvidenceRedactor,
};
