//! Sensitive-data detection and redaction
//!
//! Patterns target what shows up in Azerbaijani contact-center calls:
//! payment card numbers read out by customers, CVV/CVC requests and FIN
//! (personal identification) codes.

mod patterns;
mod redactor;

pub use patterns::{
    contains_card_number, contains_cvv, contains_national_id, contains_pii, extract_silence_seconds,
    has_silence_marker,
};
pub use redactor::EvidenceRedactor;
