//! Call evaluation pipeline
//!
//! Normalized transcript in, five criterion results out. Rule scores are
//! always computed; an oracle may override some of them depending on the
//! scoring mode, subject to evidence validation.

pub mod evaluator;
pub mod orchestrator;
pub mod validator;

pub use evaluator::{CallEvaluator, SHORT_CALL_REASONING, SHORT_CALL_SECS};
pub use orchestrator::{HybridOverrideOrchestrator, OverrideOutcome, DEFAULT_ORACLE_TIMEOUT};
pub use validator::{AntiHallucinationValidator, Candidate, Rejection, FALLBACK_MARKER};
