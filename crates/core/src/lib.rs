//! Core traits and types for call quality scoring
//!
//! This crate provides foundational types used across all other crates:
//! - Transcript types and input normalization
//! - Criterion results and the per-call output document
//! - Scoring mode
//! - Error types
//! - The oracle trait implemented by language-model backends

pub mod criterion;
pub mod error;
pub mod mode;
pub mod oracle;
pub mod transcript;

pub use criterion::{CallEvaluation, Criterion, CriterionResult, Probability};
pub use error::{Error, OracleError, Result};
pub use mode::ScoringMode;
pub use oracle::Oracle;
pub use transcript::{CallTranscript, Segment, SpeakerRole, UNKNOWN_CALL_ID};
